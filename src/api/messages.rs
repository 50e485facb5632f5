use crate::api::AppState;
use crate::api::middleware::AuthUser;
use crate::api::schemas::messaging::{MessageResponse, SendMessageRequest};
use crate::error::Result;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

/// Returns full message detail for a participant.
///
/// # Errors
/// Returns `AppError::NotFound` if the message does not exist.
/// Returns `AppError::AccessDenied` if the caller is not a participant.
pub async fn get_message(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let message = state.message_service.get_message(id, &auth_user.username).await?;

    Ok(Json(MessageResponse::from(message)))
}

/// Sends a message. The caller becomes the sender; the request cannot name
/// a different one.
///
/// # Errors
/// Returns `AppError::InvalidInput` if the body is empty.
/// Returns `AppError::UserNotFound` if the recipient does not exist.
pub async fn send_message(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<impl IntoResponse> {
    let message =
        state.message_service.create_message(&auth_user.username, &payload.to_username, &payload.body).await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::from(message))))
}

/// Marks a message read. Only the recipient may do this; repeat calls are
/// idempotent.
///
/// # Errors
/// Returns `AppError::NotFound` if the message does not exist.
/// Returns `AppError::AccessDenied` if the caller is not the recipient.
pub async fn mark_read(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let message = state.message_service.mark_read(id, &auth_user.username).await?;

    Ok(Json(MessageResponse::from(message)))
}
