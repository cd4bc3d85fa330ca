use axum::{extract::FromRequestParts, http::request::Parts};
use mongodb::bson::oid::ObjectId;

use crate::{
    error::AppError,
    models::UserRole,
    security::cookie::extract_token,
    services::auth_service::resolve_identity,
    state::AppState,
};

/// Minimal identity of the caller, resolved from a verified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: ObjectId,
    pub role: UserRole,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = extract_token(&parts.headers) else {
            tracing::debug!("no bearer token on request");
            return Err(AppError::Unauthorized);
        };
        resolve_identity(state, &token).await
    }
}
