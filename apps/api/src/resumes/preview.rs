//! Live preview composition for the multi-step editor.

use serde::{Deserialize, Serialize};

/// Everything the editor collects, as raw text per field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
    pub experience: String,
    pub education: String,
    pub skills: String,
}

/// What the preview pane renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumePreview {
    pub name: String,
    pub contact: String,
    pub summary: String,
    pub experience: String,
    pub education: String,
    pub skills: String,
}

impl ResumeDraft {
    /// `None` until at least one name field is filled in.
    pub fn preview(&self) -> Option<ResumePreview> {
        if self.first_name.is_empty() && self.last_name.is_empty() {
            return None;
        }

        let name = format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string();
        let contact = [&self.email, &self.phone, &self.location]
            .into_iter()
            .filter(|part| !part.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" | ");

        Some(ResumePreview {
            name,
            contact,
            summary: self.summary.clone(),
            experience: self.experience.clone(),
            education: self.education.clone(),
            skills: self.skills.clone(),
        })
    }
}
