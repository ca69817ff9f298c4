//! Local notification delivery
//!
//! The monitor hands finished title/body text to a NotificationSink and
//! moves on. Delivery is fire-and-forget from the monitor's point of
//! view; the Result exists so harnesses can observe outcomes.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),

    #[error("Notifications not permitted")]
    NotPermitted,
}

/// A destination for immediate local notifications.
///
/// Implementations include platform notification-center bindings and the
/// log-backed sink below. One call per alert; no acknowledgment is
/// awaited and nothing is retried.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver a notification with the given title and body, immediately.
    async fn deliver(&self, title: &str, body: &str) -> Result<(), NotifyError>;
}

/// A sink that writes notifications to the log. Useful as a default in
/// headless environments and demos.
pub struct LogNotificationSink;

#[async_trait]
impl NotificationSink for LogNotificationSink {
    async fn deliver(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        log::info!("notification: {} - {}", title, body);
        Ok(())
    }
}
