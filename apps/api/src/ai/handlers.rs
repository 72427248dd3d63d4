//! Axum route handlers for the AI proxy endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::ai::parse::{
    parse_linkedin_template, parse_missing_info, parse_resume, parse_suggestions,
};
use crate::ai::prompts::{
    build_analyze_missing_prompt, build_linkedin_prompt, build_resume_prompt,
    build_rewrite_prompt, build_suggestions_prompt, ResumeStyle,
};
use crate::errors::{ApiJson, AppError};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResumeRequest {
    #[serde(default)]
    pub user_input: String,
    pub style: Option<String>,
    pub additional_context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResumeResponse {
    pub success: bool,
    /// Shaped like `GeneratedResume`, but passed through unvalidated.
    pub resume: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsRequest {
    #[serde(default)]
    pub current_text: String,
    /// Sent by the editor; not used in the prompt.
    #[allow(dead_code)]
    pub cursor_position: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeMissingRequest {
    #[serde(default)]
    pub resume_data: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeMissingResponse {
    pub missing_info: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedInImportRequest {
    #[serde(default)]
    pub linkedin_url: String,
}

#[derive(Debug, Deserialize)]
pub struct RewriteRequest {
    pub text: String,
    pub field: String,
}

#[derive(Debug, Serialize)]
pub struct RewriteResponse {
    pub rewritten: String,
}

async fn generate(state: &AppState, prompt: &str, what: &str) -> Result<String, AppError> {
    state
        .llm
        .generate(prompt)
        .await
        .map_err(|e| AppError::Llm(format!("{what} failed: {e}")))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/ai/generate-resume
///
/// Drafts a structured resume from free-form user input. Unparseable model
/// output yields the "Error parsing resume" default, not an error.
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<GenerateResumeRequest>,
) -> Result<Json<GenerateResumeResponse>, AppError> {
    let style = ResumeStyle::from_label(request.style.as_deref());
    let prompt = build_resume_prompt(
        &request.user_input,
        style,
        request.additional_context.as_deref(),
    );

    let text = generate(&state, &prompt, "Resume generation").await?;
    info!(?style, "Generated resume draft");

    Ok(Json(GenerateResumeResponse {
        success: true,
        resume: parse_resume(&text),
    }))
}

/// POST /api/ai/suggestions
pub async fn handle_suggestions(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SuggestionsRequest>,
) -> Result<Json<SuggestionsResponse>, AppError> {
    let prompt = build_suggestions_prompt(&request.current_text);
    let text = generate(&state, &prompt, "Suggestions").await?;

    Ok(Json(SuggestionsResponse {
        suggestions: parse_suggestions(&text),
    }))
}

/// POST /api/ai/analyze-missing
pub async fn handle_analyze_missing(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AnalyzeMissingRequest>,
) -> Result<Json<AnalyzeMissingResponse>, AppError> {
    let prompt = build_analyze_missing_prompt(&request.resume_data);
    let text = generate(&state, &prompt, "Missing-info analysis").await?;

    Ok(Json(AnalyzeMissingResponse {
        missing_info: parse_missing_info(&text),
    }))
}

/// POST /api/linkedin/import
///
/// Profiles cannot be scraped, so this only ever returns a template for
/// manual entry. Upstream failures carry a `message` hint alongside the error.
pub async fn handle_linkedin_import(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LinkedInImportRequest>,
) -> Response {
    let prompt = build_linkedin_prompt(&request.linkedin_url);
    match state.llm.generate(&prompt).await {
        Ok(text) => Json(parse_linkedin_template(&text)).into_response(),
        Err(e) => {
            error!("LinkedIn import error: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": {
                        "code": "LLM_ERROR",
                        "message": "LinkedIn import failed. Please enter your information manually."
                    },
                    "message": "For best results, copy and paste your LinkedIn information into the form fields."
                })),
            )
                .into_response()
        }
    }
}

/// POST /api/ai/rewrite
///
/// Rewrites one resume field. Returns the model's text verbatim; keeping the
/// previous value for undo is the client's job.
pub async fn handle_rewrite(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RewriteRequest>,
) -> Result<Json<RewriteResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }
    let field = match request.field.trim() {
        "" => "section",
        field => field,
    };

    let prompt = build_rewrite_prompt(field, &request.text);
    let rewritten = generate(&state, &prompt, "Rewrite").await?;

    Ok(Json(RewriteResponse { rewritten }))
}
