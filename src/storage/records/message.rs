use crate::domain::message::Message;
use crate::domain::user::UserSummary;
use time::OffsetDateTime;
use uuid::Uuid;

/// One message row joined against both participant user rows.
#[derive(sqlx::FromRow)]
pub(crate) struct MessageDetailRecord {
    pub id: Uuid,
    pub body: String,
    pub sent_at: OffsetDateTime,
    pub read_at: Option<OffsetDateTime>,
    pub from_username: String,
    pub from_first_name: String,
    pub from_last_name: String,
    pub from_phone: String,
    pub to_username: String,
    pub to_first_name: String,
    pub to_last_name: String,
    pub to_phone: String,
}

impl From<MessageDetailRecord> for Message {
    fn from(record: MessageDetailRecord) -> Self {
        Self {
            id: record.id,
            body: record.body,
            sent_at: record.sent_at,
            read_at: record.read_at,
            from_user: UserSummary {
                username: record.from_username,
                first_name: record.from_first_name,
                last_name: record.from_last_name,
                phone: record.from_phone,
            },
            to_user: UserSummary {
                username: record.to_username,
                first_name: record.to_first_name,
                last_name: record.to_last_name,
                phone: record.to_phone,
            },
        }
    }
}
