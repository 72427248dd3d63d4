use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account. Keyed by email in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Ids of owned resumes, in save order.
    pub resumes: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// The user shape returned to clients (no hash, no resume list).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}
