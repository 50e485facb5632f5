use crate::domain::message::Message;
use crate::domain::policy::{self, MessageAction};
use crate::error::{AppError, Result};
use crate::storage::message_repo::MessageRepository;
use crate::storage::user_repo::UserRepository;
use opentelemetry::{global, metrics::Counter};
use uuid::Uuid;

#[derive(Clone, Debug)]
struct Metrics {
    sent_total: Counter<u64>,
    read_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("courier-server");
        Self {
            sent_total: meter
                .u64_counter("courier_messages_sent_total")
                .with_description("Total messages successfully sent")
                .build(),
            read_total: meter
                .u64_counter("courier_messages_read_total")
                .with_description("Total messages transitioned from unread to read")
                .build(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MessageService {
    repo: MessageRepository,
    user_repo: UserRepository,
    metrics: Metrics,
}

impl MessageService {
    #[must_use]
    pub fn new(repo: MessageRepository, user_repo: UserRepository) -> Self {
        Self { repo, user_repo, metrics: Metrics::new() }
    }

    /// Creates a message from `from_username` to `to_username`. The sender is
    /// the resolved caller identity; it is never taken from the request body.
    ///
    /// # Errors
    /// Returns `AppError::InvalidInput` if the body or sender is empty.
    /// Returns `AppError::UserNotFound` if either username does not resolve.
    /// Returns `AppError::Database` if the message cannot be stored.
    #[tracing::instrument(
        err(level = "warn"),
        skip(self, body),
        fields(to_username = %to_username)
    )]
    pub async fn create_message(&self, from_username: &str, to_username: &str, body: &str) -> Result<Message> {
        if from_username.is_empty() {
            return Err(AppError::InvalidInput("sender must not be empty".to_string()));
        }
        if body.trim().is_empty() {
            return Err(AppError::InvalidInput("message body must not be empty".to_string()));
        }

        let from_user = self
            .user_repo
            .find_summary(from_username)
            .await?
            .ok_or_else(|| AppError::UserNotFound(from_username.to_string()))?;
        let to_user = self
            .user_repo
            .find_summary(to_username)
            .await?
            .ok_or_else(|| AppError::UserNotFound(to_username.to_string()))?;

        let id = Uuid::now_v7();
        let sent_at = self.repo.insert(id, from_username, to_username, body).await?;
        self.metrics.sent_total.add(1, &[]);
        tracing::debug!(message_id = %id, "Message stored");

        Ok(Message { id, body: body.to_string(), sent_at, read_at: None, from_user, to_user })
    }

    /// Fetches message detail for a participant.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if the id does not resolve.
    /// Returns `AppError::AccessDenied` if the requester is neither the
    /// sender nor the recipient; no detail leaves the service in that case.
    #[tracing::instrument(err(level = "warn"), skip(self), fields(message_id = %id))]
    pub async fn get_message(&self, id: Uuid, requesting_username: &str) -> Result<Message> {
        let message = self.repo.get(id).await?.ok_or(AppError::NotFound)?;
        policy::authorize(&message, requesting_username, MessageAction::ViewDetail)?;
        Ok(message)
    }

    /// Marks a message read on behalf of its recipient.
    ///
    /// A repeat call after the message is already read is an idempotent
    /// no-op: it succeeds and returns the existing `read_at` unchanged.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if the id does not resolve.
    /// Returns `AppError::AccessDenied` if the requester is not the recipient.
    #[tracing::instrument(err(level = "warn"), skip(self), fields(message_id = %id))]
    pub async fn mark_read(&self, id: Uuid, requesting_username: &str) -> Result<Message> {
        let message = self.repo.get(id).await?.ok_or(AppError::NotFound)?;
        policy::authorize(&message, requesting_username, MessageAction::MarkRead)?;

        if message.is_read() {
            tracing::debug!("Message already read");
            return Ok(message);
        }

        // Conditional update: a concurrent call may have won the transition,
        // in which case rows_affected is zero and the re-read below picks up
        // the winner's timestamp.
        if self.repo.mark_read(id).await? {
            self.metrics.read_total.add(1, &[]);
        }

        self.repo.get(id).await?.ok_or(AppError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_service() -> MessageService {
        let pool = sqlx::PgPool::connect_lazy("postgres://localhost/test").unwrap();
        MessageService::new(MessageRepository::new(pool.clone()), UserRepository::new(pool))
    }

    #[tokio::test]
    async fn test_create_message_rejects_empty_body() {
        let service = setup_service();

        let result = service.create_message("alice", "bob", "").await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_create_message_rejects_whitespace_body() {
        let service = setup_service();

        let result = service.create_message("alice", "bob", "   \n\t").await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_create_message_rejects_empty_sender() {
        let service = setup_service();

        let result = service.create_message("", "bob", "hi").await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
