use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Authentication required")]
    Unauthenticated,
    #[error("Invalid request: {0}")]
    InvalidInput(String),
    #[error("User not found: {0}")]
    UserNotFound(String),
    #[error("Message not found")]
    NotFound,
    #[error("Access denied")]
    AccessDenied,
    #[error("Internal server error")]
    Internal,
}

pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::Unauthenticated => {
                tracing::debug!("Authentication failed");
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            AppError::InvalidInput(msg) => {
                tracing::debug!(message = %msg, "Invalid request");
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::UserNotFound(username) => {
                tracing::debug!(username = %username, "User not found");
                (StatusCode::NOT_FOUND, format!("User not found: {username}"))
            }
            AppError::NotFound => {
                tracing::debug!("Message not found");
                (StatusCode::NOT_FOUND, "Not found".to_string())
            }
            AppError::AccessDenied => {
                tracing::debug!("Access denied");
                (StatusCode::FORBIDDEN, "Access denied".to_string())
            }
            AppError::Internal => {
                tracing::error!("Internal server error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
