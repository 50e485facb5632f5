use crate::domain::message::Message;
use crate::error::Result;
use crate::storage::records::MessageDetailRecord;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new message row and returns the store-assigned `sent_at`.
    /// `read_at` starts NULL.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the insert fails.
    pub async fn insert(
        &self,
        id: Uuid,
        from_username: &str,
        to_username: &str,
        body: &str,
    ) -> Result<OffsetDateTime> {
        let sent_at: OffsetDateTime = sqlx::query_scalar(
            r#"
            INSERT INTO messages (id, from_username, to_username, body)
            VALUES ($1, $2, $3, $4)
            RETURNING sent_at
            "#,
        )
        .bind(id)
        .bind(from_username)
        .bind(to_username)
        .bind(body)
        .fetch_one(&self.pool)
        .await?;

        Ok(sent_at)
    }

    /// Fetches full message detail with both participant summaries embedded.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the query fails.
    pub async fn get(&self, id: Uuid) -> Result<Option<Message>> {
        let record = sqlx::query_as::<_, MessageDetailRecord>(
            r#"
            SELECT m.id, m.body, m.sent_at, m.read_at,
                   f.username AS from_username, f.first_name AS from_first_name,
                   f.last_name AS from_last_name, f.phone AS from_phone,
                   t.username AS to_username, t.first_name AS to_first_name,
                   t.last_name AS to_last_name, t.phone AS to_phone
            FROM messages m
            JOIN users f ON f.username = m.from_username
            JOIN users t ON t.username = m.to_username
            WHERE m.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Message::from))
    }

    /// Performs the unread -> read transition. The update is conditional on
    /// `read_at` still being NULL, so under concurrent invocation the first
    /// writer wins and the timestamp is set exactly once.
    ///
    /// Returns `true` if this call performed the transition.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the update fails.
    pub async fn mark_read(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET read_at = now()
            WHERE id = $1 AND read_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
