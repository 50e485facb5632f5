use crate::domain::message::Message;
use crate::domain::user::UserSummary;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub to_username: String,
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct UserSummarySchema {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

#[derive(Debug, Serialize)]
pub struct MessageSchema {
    pub id: Uuid,
    pub body: String,
    #[serde(with = "time::serde::rfc3339")]
    pub sent_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub read_at: Option<OffsetDateTime>,
    pub from_user: UserSummarySchema,
    pub to_user: UserSummarySchema,
}

/// Wire envelope: every message endpoint responds `{"message": {...}}`.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: MessageSchema,
}

impl From<UserSummary> for UserSummarySchema {
    fn from(summary: UserSummary) -> Self {
        Self {
            username: summary.username,
            first_name: summary.first_name,
            last_name: summary.last_name,
            phone: summary.phone,
        }
    }
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            message: MessageSchema {
                id: message.id,
                body: message.body,
                sent_at: message.sent_at,
                read_at: message.read_at,
                from_user: message.from_user.into(),
                to_user: message.to_user.into(),
            },
        }
    }
}
