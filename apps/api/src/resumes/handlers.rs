//! Axum route handlers for the Resume API.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::auth::extractor::Owner;
use crate::errors::{ApiJson, AppError};
use crate::models::resume::ResumeRecord;
use crate::resumes::preview::{ResumeDraft, ResumePreview};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResumeRequest {
    #[serde(default)]
    pub resume_data: Value,
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResumeResponse {
    pub success: bool,
    pub resume_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ResumeListResponse {
    pub resumes: Vec<ResumeRecord>,
}

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub resume: ResumeRecord,
}

#[derive(Debug, Serialize)]
pub struct UpdateResumeResponse {
    pub success: bool,
    pub resume: ResumeRecord,
}

#[derive(Debug, Serialize)]
pub struct DeleteResumeResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub preview: Option<ResumePreview>,
}

fn not_found() -> AppError {
    AppError::NotFound("Resume not found".to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/resumes/save
pub async fn handle_save(
    State(state): State<AppState>,
    owner: Owner,
    ApiJson(req): ApiJson<SaveResumeRequest>,
) -> Result<Json<SaveResumeResponse>, AppError> {
    let title = req.title.filter(|t| !t.is_empty());
    let record = state
        .store
        .insert_resume(owner.as_str(), title, req.resume_data)?;
    info!(resume_id = %record.id, owner = %owner.as_str(), "Saved resume");

    Ok(Json(SaveResumeResponse {
        success: true,
        resume_id: record.id,
        timestamp: record.created_at,
    }))
}

/// GET /api/resumes
pub async fn handle_list(
    State(state): State<AppState>,
    owner: Owner,
) -> Result<Json<ResumeListResponse>, AppError> {
    let resumes = state.store.list_resumes(owner.as_str())?;
    Ok(Json(ResumeListResponse { resumes }))
}

/// GET /api/resumes/:id
pub async fn handle_get(
    State(state): State<AppState>,
    owner: Owner,
    Path(resume_id): Path<String>,
) -> Result<Json<ResumeResponse>, AppError> {
    let resume = state
        .store
        .get_resume(owner.as_str(), &resume_id)?
        .ok_or_else(not_found)?;
    Ok(Json(ResumeResponse { resume }))
}

/// PUT /api/resumes/:id
///
/// Replaces the payload wholesale; there is no version check.
pub async fn handle_update(
    State(state): State<AppState>,
    owner: Owner,
    Path(resume_id): Path<String>,
    ApiJson(req): ApiJson<SaveResumeRequest>,
) -> Result<Json<UpdateResumeResponse>, AppError> {
    let resume = state
        .store
        .update_resume(owner.as_str(), &resume_id, req.title, req.resume_data)?
        .ok_or_else(not_found)?;
    info!(resume_id = %resume.id, "Updated resume");

    Ok(Json(UpdateResumeResponse {
        success: true,
        resume,
    }))
}

/// DELETE /api/resumes/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    owner: Owner,
    Path(resume_id): Path<String>,
) -> Result<Json<DeleteResumeResponse>, AppError> {
    if !state.store.delete_resume(owner.as_str(), &resume_id)? {
        return Err(not_found());
    }
    info!(resume_id = %resume_id, "Deleted resume");
    Ok(Json(DeleteResumeResponse { success: true }))
}

/// POST /api/resumes/preview
pub async fn handle_preview(ApiJson(draft): ApiJson<ResumeDraft>) -> Json<PreviewResponse> {
    Json(PreviewResponse {
        preview: draft.preview(),
    })
}
