use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::issue_token;
use crate::errors::{ApiJson, AppError};
use crate::models::user::{PublicUser, User};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

/// POST /api/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    // Checked before hashing so a collision costs no bcrypt round.
    if state.store.find_user_by_email(&req.email)?.is_some() {
        return Err(AppError::AlreadyExists("User already exists".to_string()));
    }

    let password_hash = hash_password(req.password).await?;
    let user = state.store.create_user(User {
        id: Uuid::new_v4().to_string(),
        email: req.email,
        name: req.name,
        password_hash,
        resumes: Vec::new(),
        created_at: Utc::now(),
    })?;

    let token = issue_token(&state.config.jwt_secret, &user.id, &user.email)?;
    info!(user_id = %user.id, "Registered new user");

    Ok(Json(AuthResponse {
        token,
        user: PublicUser::from(&user),
    }))
}

/// POST /api/auth/login
///
/// Unknown email and wrong password produce the same 401.
pub async fn handle_login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = state
        .store
        .find_user_by_email(&req.email)?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(req.password, user.password_hash.clone()).await? {
        return Err(AppError::InvalidCredentials);
    }

    let token = issue_token(&state.config.jwt_secret, &user.id, &user.email)?;
    info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse {
        token,
        user: PublicUser::from(&user),
    }))
}

/// GET /api/auth/me
pub async fn handle_me(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<PublicUser>, AppError> {
    let user = state
        .store
        .find_user_by_id(&claims.user_id)?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", claims.user_id)))?;
    Ok(Json(PublicUser::from(&user)))
}
