use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::auth::token::{verify_token, Claims};
use crate::errors::AppError;
use crate::models::resume::GUEST_OWNER;
use crate::state::AppState;

/// The second space-separated word of the `Authorization` header, if non-empty.
///
/// The scheme word is not checked: `Basic abc` yields `abc`, which then fails
/// verification with 403 rather than being treated as a missing token.
fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.split(' ').nth(1)?;
    (!token.is_empty()).then_some(token)
}

/// A caller holding a valid session token.
///
/// Missing token → 401, invalid or expired token → 403.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;
        let claims = verify_token(&state.config.jwt_secret, token)?;
        Ok(AuthUser(claims))
    }
}

/// Whose resumes a request operates on: the token's user when a bearer token
/// is sent, otherwise the shared guest owner. Once an `Authorization` header
/// is sent it must carry a valid token: no token is 401, a bad one 403.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner(pub String);

impl Owner {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Owner {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(Owner(GUEST_OWNER.to_string()));
        }
        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;
        let claims = verify_token(&state.config.jwt_secret, token)?;
        Ok(Owner(claims.user_id))
    }
}
