use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

pub const INVALID_CREDENTIALS: &str = "invalid credentials";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("Storage error")]
    Storage(#[from] mongodb::error::Error),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        let (message, error) = match self {
            AppError::Validation(detail) => ("Invalid request", detail.clone()),
            AppError::InvalidCredentials => (INVALID_CREDENTIALS, "Invalid email or password".into()),
            AppError::Unauthorized => ("Unauthorized", "Unauthorized".into()),
            AppError::NotFound(detail) => ("Not Found", detail.clone()),
            AppError::Storage(_) => ("Storage error", "Database operation failed".into()),
            AppError::Internal(_) => ("Internal Server Error", "An unexpected error occurred".into()),
        };
        ErrorBody {
            message: message.to_string(),
            error,
        }
    }
}

/// Wire shape of every failed request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Storage(err) => tracing::error!(error = %err, "storage operation failed"),
            AppError::Internal(err) => tracing::error!(error = ?err, "internal error"),
            _ => {}
        }

        (self.status(), axum::Json(self.body())).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
