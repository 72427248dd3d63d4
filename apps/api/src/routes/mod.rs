pub mod health;


use axum::{
    routing::{get, post},
    Router,
};

use crate::ai::handlers as ai;
use crate::auth::handlers as auth;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

/// Every route, as `(method, path, description)`. Logged at startup.
pub const ENDPOINTS: &[(&str, &str, &str)] = &[
    ("POST", "/api/auth/register", "Register new user"),
    ("POST", "/api/auth/login", "Login user"),
    ("GET", "/api/auth/me", "Current user"),
    ("POST", "/api/ai/generate-resume", "Generate resume with AI"),
    ("POST", "/api/ai/suggestions", "Get real-time suggestions"),
    ("POST", "/api/ai/analyze-missing", "Analyze missing info"),
    ("POST", "/api/ai/rewrite", "Rewrite a resume section"),
    ("POST", "/api/linkedin/import", "LinkedIn import template"),
    ("POST", "/api/resumes/save", "Save resume version"),
    ("POST", "/api/resumes/preview", "Compose live preview"),
    ("GET", "/api/resumes", "Get all user resumes"),
    ("GET", "/api/resumes/:id", "Get specific resume"),
    ("PUT", "/api/resumes/:id", "Update resume"),
    ("DELETE", "/api/resumes/:id", "Delete resume"),
];

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Accounts
        .route("/api/auth/register", post(auth::handle_register))
        .route("/api/auth/login", post(auth::handle_login))
        .route("/api/auth/me", get(auth::handle_me))
        // AI proxy
        .route("/api/ai/generate-resume", post(ai::handle_generate_resume))
        .route("/api/ai/suggestions", post(ai::handle_suggestions))
        .route("/api/ai/analyze-missing", post(ai::handle_analyze_missing))
        .route("/api/ai/rewrite", post(ai::handle_rewrite))
        .route("/api/linkedin/import", post(ai::handle_linkedin_import))
        // Resumes
        .route("/api/resumes/save", post(resumes::handle_save))
        .route("/api/resumes/preview", post(resumes::handle_preview))
        .route("/api/resumes", get(resumes::handle_list))
        .route(
            "/api/resumes/:id",
            get(resumes::handle_get)
                .put(resumes::handle_update)
                .delete(resumes::handle_delete),
        )
        .with_state(state)
}
