use crate::domain::message::Message;
use crate::error::{AppError, Result};

/// Operations on an existing message that require an access decision.
/// Creation needs none: the resolved caller identity becomes the sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageAction {
    /// Viewing full message detail; allowed for either participant.
    ViewDetail,
    /// The unread -> read transition; allowed for the recipient only.
    MarkRead,
}

/// Decides whether `username` may perform `action` on `message`.
///
/// # Errors
/// Returns `AppError::AccessDenied` if the operation is not permitted.
pub fn authorize(message: &Message, username: &str, action: MessageAction) -> Result<()> {
    let permitted = match action {
        MessageAction::ViewDetail => message.is_participant(username),
        MessageAction::MarkRead => message.is_recipient(username),
    };

    if permitted { Ok(()) } else { Err(AppError::AccessDenied) }
}
