use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Owner id used for callers without a bearer token.
pub const GUEST_OWNER: &str = "guest";

pub const DEFAULT_TITLE: &str = "Untitled Resume";

/// A stored resume document. `data` is opaque to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResumeRecord {
    pub fn new(id: String, user_id: String, title: Option<String>, data: Value) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            title: title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            data,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, owner: &str) -> bool {
        self.user_id == owner
    }
}
