//! Shapes the AI proxy endpoints ask the model for.
//!
//! Model output itself is passed through as JSON; these types build the
//! fallbacks returned when the output holds no usable object.

use serde::Serialize;

/// A resume as requested from `/api/ai/generate-resume`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeneratedResume {
    pub name: String,
    pub contact: String,
    pub summary: String,
    /// Items are `{ title, company, period, highlights[] }` objects.
    pub experience: Vec<serde_json::Value>,
    pub education: String,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,
}

impl GeneratedResume {
    /// Returned when the model output holds no usable JSON object.
    pub fn parse_failure() -> Self {
        Self {
            name: "Error parsing resume".to_string(),
            ..Self::default()
        }
    }
}

/// Manual-entry template returned by `/api/linkedin/import`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedInTemplate {
    pub message: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub location: String,
    pub summary: String,
    pub experiences: Vec<serde_json::Value>,
    pub education: Vec<serde_json::Value>,
    pub skills: Vec<serde_json::Value>,
}

impl LinkedInTemplate {
    pub fn manual_entry() -> Self {
        Self {
            message: "Please manually copy your information from LinkedIn. \
                LinkedIn doesn't allow automated data extraction."
                .to_string(),
            ..Self::default()
        }
    }
}
