// All LLM prompt templates for the AI proxy endpoints.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{ATS_INSTRUCTION, WRITER_PERSONA};

/// Requested level of detail for a generated resume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResumeStyle {
    Detailed,
    #[default]
    Balanced,
    Concise,
}

impl ResumeStyle {
    /// Lenient parse: anything unrecognised is `Balanced`.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            Some("detailed") => ResumeStyle::Detailed,
            Some("concise") => ResumeStyle::Concise,
            _ => ResumeStyle::Balanced,
        }
    }

    pub fn instruction(self) -> &'static str {
        match self {
            ResumeStyle::Detailed => {
                "Create a comprehensive, detailed resume with extensive descriptions."
            }
            ResumeStyle::Balanced => {
                "Create a balanced resume with moderate detail and clear sections."
            }
            ResumeStyle::Concise => {
                "Create a concise, one-page resume focusing on key highlights."
            }
        }
    }
}

/// Resume generation template. Replace `{persona}`, `{style}`, `{user_input}`,
/// `{additional_context}` and `{ats}` before sending.
pub const GENERATE_RESUME_TEMPLATE: &str = r#"{persona} Parse the following information and create a well-structured resume in JSON format.

Style preference: {style}

User's information:
{user_input}

{additional_context}

Return ONLY a JSON object with this exact structure:
{
  "name": "Full Name",
  "contact": "email@example.com | (555) 123-4567 | City, State",
  "summary": "Professional summary paragraph",
  "experience": [
    {
      "title": "Job Title",
      "company": "Company Name",
      "period": "Start Date - End Date",
      "highlights": ["Achievement 1", "Achievement 2", "Achievement 3"]
    }
  ],
  "education": "Degree, Institution, Year",
  "skills": ["Skill 1", "Skill 2", "Skill 3"],
  "references": "Available upon request"
}

{ats}"#;

pub const SUGGESTIONS_TEMPLATE: &str = "Given this partial resume text, suggest 3-4 specific \
improvements. Be brief and actionable:\n\n{current_text}";

pub const ANALYZE_MISSING_TEMPLATE: &str = "Analyze this resume and suggest what crucial \
information is missing. Return ONLY a JSON array of specific suggestions:\n\n{resume_json}\n\n\
Format: [\"suggestion 1\", \"suggestion 2\", ...]";

pub const LINKEDIN_TEMPLATE: &str = r#"I have a LinkedIn URL: {linkedin_url}

Since we can't actually scrape LinkedIn, please return a helpful JSON template that the user should fill in manually.
Return ONLY this JSON structure:

{
  "message": "LinkedIn scraping is not available. Please copy your information from LinkedIn and paste it into the fields.",
  "firstName": "",
  "lastName": "",
  "email": "",
  "location": "",
  "summary": "",
  "experiences": [],
  "education": [],
  "skills": []
}"#;

pub const REWRITE_TEMPLATE: &str = "Rewrite this resume {field} professionally and make it \
ATS-friendly. Keep the same info but make it compelling:\n\n{text}";

/// Substitutes `{name}` placeholders in one left-to-right pass over the
/// template. Inserted values are never scanned again, so caller text that
/// happens to contain `{user_input}` or `{text}` stays literal.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let hit = values.iter().find_map(|(name, value)| {
            let placeholder_len = name.len() + 2;
            let matches = tail.len() >= placeholder_len
                && tail[1..].starts_with(name)
                && tail[1 + name.len()..].starts_with('}');
            matches.then_some((placeholder_len, *value))
        });
        match hit {
            Some((len, value)) => {
                out.push_str(value);
                rest = &tail[len..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn build_resume_prompt(
    user_input: &str,
    style: ResumeStyle,
    additional_context: Option<&str>,
) -> String {
    let context = match additional_context.map(str::trim) {
        Some(ctx) if !ctx.is_empty() => format!("Additional context: {ctx}"),
        _ => String::new(),
    };
    fill(
        GENERATE_RESUME_TEMPLATE,
        &[
            ("persona", WRITER_PERSONA),
            ("style", style.instruction()),
            ("user_input", user_input),
            ("additional_context", &context),
            ("ats", ATS_INSTRUCTION),
        ],
    )
}

pub fn build_suggestions_prompt(current_text: &str) -> String {
    fill(SUGGESTIONS_TEMPLATE, &[("current_text", current_text)])
}

pub fn build_analyze_missing_prompt(resume_data: &serde_json::Value) -> String {
    fill(
        ANALYZE_MISSING_TEMPLATE,
        &[("resume_json", &resume_data.to_string())],
    )
}

pub fn build_linkedin_prompt(linkedin_url: &str) -> String {
    fill(LINKEDIN_TEMPLATE, &[("linkedin_url", linkedin_url)])
}

pub fn build_rewrite_prompt(field: &str, text: &str) -> String {
    fill(REWRITE_TEMPLATE, &[("field", field), ("text", text)])
}
