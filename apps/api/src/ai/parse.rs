//! Reinterprets free-text model output as structured data.
//!
//! Models wrap JSON in prose or code fences often enough that every parser
//! first cuts out the outermost span between the first opening and last
//! closing delimiter. None of these functions fail: malformed output falls
//! back to a documented default.
//!
//! Objects are passed through as parsed. Field types are not checked, so a
//! `null` or an unexpected shape in one field never discards the rest.

use serde_json::Value;
use tracing::warn;

use crate::models::generated::{GeneratedResume, LinkedInTemplate};

const MAX_SUGGESTIONS: usize = 4;
const MIN_SUGGESTION_LEN: usize = 10;
const MAX_MISSING_INFO: usize = 5;

/// Greedy span from the first `open` to the last `close`, inclusive.
fn outer_span(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// The outermost `{ ... }` span, if any.
pub fn extract_json_object(text: &str) -> Option<&str> {
    outer_span(text, '{', '}')
}

/// The outermost `[ ... ]` span, if any.
pub fn extract_json_array(text: &str) -> Option<&str> {
    outer_span(text, '[', ']')
}

fn parse_object(text: &str) -> Option<Value> {
    let span = extract_json_object(text)?;
    match serde_json::from_str::<Value>(span) {
        Ok(value) if value.is_object() => Some(value),
        Ok(_) => None,
        Err(e) => {
            warn!("Discarding malformed JSON from model output: {e}");
            None
        }
    }
}

/// The model's resume object, or the "Error parsing resume" default.
pub fn parse_resume(text: &str) -> Value {
    parse_object(text).unwrap_or_else(|| {
        warn!("No valid resume JSON found in model output");
        serde_json::to_value(GeneratedResume::parse_failure()).unwrap_or_default()
    })
}

/// The model's template object, or the manual-entry default.
pub fn parse_linkedin_template(text: &str) -> Value {
    parse_object(text).unwrap_or_else(|| {
        serde_json::to_value(LinkedInTemplate::manual_entry()).unwrap_or_default()
    })
}

/// Non-blank lines longer than ten characters, at most four.
pub fn parse_suggestions(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .filter(|line| line.chars().count() > MIN_SUGGESTION_LEN)
        .take(MAX_SUGGESTIONS)
        .map(str::to_string)
        .collect()
}

/// A JSON string array when the output contains one. With no `[`..`]` span
/// the result is empty; with a span that does not parse, the first five
/// non-blank lines are used instead.
pub fn parse_missing_info(text: &str) -> Vec<String> {
    let Some(span) = extract_json_array(text) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<serde_json::Value>>(span) {
        Ok(items) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        Err(_) => text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .take(MAX_MISSING_INFO)
            .map(str::to_string)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_object_from_fenced_output() {
        let text = "Here you go:\n```json\n{\"name\": \"Ada\", \"nested\": {\"a\": 1}}\n```\nEnjoy!";
        assert_eq!(
            extract_json_object(text),
            Some("{\"name\": \"Ada\", \"nested\": {\"a\": 1}}")
        );
    }

    #[test]
    fn test_extract_object_none_when_reversed() {
        assert_eq!(extract_json_object("} nothing {"), None);
        assert_eq!(extract_json_object("no braces at all"), None);
    }

    #[test]
    fn test_parse_resume_valid() {
        let text = r#"Sure! {"name": "Ada Lovelace", "contact": "ada@example.com",
            "summary": "Mathematician", "experience": [{"title": "Analyst",
            "company": "Babbage & Co", "period": "1842 - 1843",
            "highlights": ["Wrote the first program"]}],
            "education": "Private tutoring", "skills": ["Mathematics"]}"#;
        let resume = parse_resume(text);
        assert_eq!(resume["name"], "Ada Lovelace");
        assert_eq!(resume["experience"].as_array().unwrap().len(), 1);
        assert_eq!(resume["experience"][0]["company"], "Babbage & Co");
        assert_eq!(resume["skills"], json!(["Mathematics"]));
    }

    #[test]
    fn test_parse_resume_keeps_null_and_unexpected_field_types() {
        let resume = parse_resume(
            r#"{"name": "Ada Lovelace", "contact": "ada@example.com", "summary": "Mathematician",
                "experience": [], "education": null, "skills": ["Math"]}"#,
        );
        assert_eq!(resume["name"], "Ada Lovelace");
        assert!(resume["education"].is_null());
        assert_eq!(resume["skills"], json!(["Math"]));

        let resume = parse_resume(
            r#"{"name": "Ada Lovelace", "education": ["BSc", "MSc"], "projects": ["Engine notes"]}"#,
        );
        assert_eq!(resume["name"], "Ada Lovelace");
        assert_eq!(resume["education"], json!(["BSc", "MSc"]));
        assert_eq!(resume["projects"], json!(["Engine notes"]));
    }

    #[test]
    fn test_parse_resume_malformed_falls_back() {
        let fallback = serde_json::to_value(GeneratedResume::parse_failure()).unwrap();
        assert_eq!(parse_resume("{ this is not json }"), fallback);
        assert_eq!(parse_resume("I could not produce a resume."), fallback);
        assert_eq!(fallback["name"], "Error parsing resume");
    }

    #[test]
    fn test_parse_suggestions_filters_and_limits() {
        let text = "1. Add metrics to each role\n\nshort\n2. Quantify team size led\n\
                    3. Mention the tech stack used\n4. Lead with the strongest result\n\
                    5. This one is dropped by the limit";
        let suggestions = parse_suggestions(text);
        assert_eq!(suggestions.len(), 4);
        assert_eq!(suggestions[0], "1. Add metrics to each role");
        assert!(!suggestions.iter().any(|s| s == "short"));
    }

    #[test]
    fn test_parse_missing_info_json_array() {
        let text = "```json\n[\"Add a phone number\", \"List certifications\"]\n```";
        assert_eq!(
            parse_missing_info(text),
            vec![
                "Add a phone number".to_string(),
                "List certifications".to_string()
            ]
        );
    }

    #[test]
    fn test_parse_missing_info_no_array_is_empty() {
        assert!(parse_missing_info("Looks complete to me.").is_empty());
    }

    #[test]
    fn test_parse_missing_info_broken_array_uses_lines() {
        let text = "[Add a phone number\nList certifications\n\nAdd dates]\nfour\nfive\nsix";
        let items = parse_missing_info(text);
        assert_eq!(items.len(), 5);
        assert_eq!(items[0], "[Add a phone number");
        assert_eq!(items[4], "five");
    }

    #[test]
    fn test_parse_linkedin_template() {
        let text = r#"{"message": "Fill these in", "firstName": "Ada", "skills": ["Math"]}"#;
        let template = parse_linkedin_template(text);
        assert_eq!(template["firstName"], "Ada");
        assert_eq!(template["message"], "Fill these in");
        assert_eq!(template["skills"], json!(["Math"]));

        assert_eq!(
            parse_linkedin_template("no json"),
            serde_json::to_value(LinkedInTemplate::manual_entry()).unwrap()
        );
    }

    #[test]
    fn test_parse_linkedin_template_keeps_nulls_and_extra_keys() {
        let template = parse_linkedin_template(
            r#"{"firstName": "Ada", "email": null, "headline": "Analyst"}"#,
        );
        assert_eq!(template["firstName"], "Ada");
        assert!(template["email"].is_null());
        assert_eq!(template["headline"], "Analyst");
        assert!(template.get("message").is_none());
    }
}
