use crate::domain::user::UserSummary;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Message {
    pub id: Uuid,
    pub body: String,
    pub sent_at: OffsetDateTime,
    /// `None` until the recipient marks the message read; set exactly once.
    pub read_at: Option<OffsetDateTime>,
    pub from_user: UserSummary,
    pub to_user: UserSummary,
}

impl Message {
    /// Whether `username` is the sender or the recipient.
    #[must_use]
    pub fn is_participant(&self, username: &str) -> bool {
        self.from_user.username == username || self.to_user.username == username
    }

    #[must_use]
    pub fn is_recipient(&self, username: &str) -> bool {
        self.to_user.username == username
    }

    #[must_use]
    pub const fn is_read(&self) -> bool {
        self.read_at.is_some()
    }
}
