use crate::domain::user::{User, UserSummary};
use crate::error::Result;
use crate::storage::records::UserRecord;
use sqlx::PgPool;

#[derive(Clone, Debug)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a user record. Provisioning belongs to the external identity
    /// subsystem; this is its write path.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the insert fails.
    pub async fn create(&self, username: &str, first_name: &str, last_name: &str, phone: &str) -> Result<User> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (username, first_name, last_name, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING username, first_name, last_name, phone, created_at
            "#,
        )
        .bind(username)
        .bind(first_name)
        .bind(last_name)
        .bind(phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(user.into())
    }

    /// Resolves a username to its embeddable summary; `None` doubles as the
    /// existence check at message-creation time.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the query fails.
    pub async fn find_summary(&self, username: &str) -> Result<Option<UserSummary>> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT username, first_name, last_name, phone, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(UserSummary::from))
    }
}
