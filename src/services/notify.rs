//! Notification sending.
//!
//! Email delivery is an external collaborator with no internal logic. The
//! shipped implementation logs the outgoing message; a real transport would
//! implement the same trait and surface failures as
//! [`crate::error::AppError::Notification`].

use async_trait::async_trait;

use crate::error::AppResult;

/// Fire-and-forget notification delivery.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()>;
}

/// Logs outgoing mail instead of delivering it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotificationSender;

#[async_trait]
impl NotificationSender for LogNotificationSender {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        tracing::info!("Mail to {} [{}]: {}", to, subject, body);
        Ok(())
    }
}
