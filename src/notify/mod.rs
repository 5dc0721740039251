//! Operator notifications.
//!
//! # Data Flow
//! ```text
//! Orchestrator outcome
//!     → NotificationFanout::broadcast (one call per run)
//!         → sns.rs   (topic publish, e.g. email subscribers)
//!         → slack.rs (chat webhook)
//! ```
//!
//! # Design Decisions
//! - A failing channel is logged and does not stop the others
//! - Delivery is best effort; nothing is retried

pub mod slack;
pub mod sns;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::observability::metrics;

pub use slack::SlackWebhook;
pub use sns::SnsTopic;

/// Errors from a notification channel.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("topic publish failed: {0}")]
    Topic(String),

    #[error("webhook request failed: {0}")]
    Webhook(String),

    #[error("webhook rejected message with status {0}")]
    Rejected(u16),
}

/// A single delivery channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Short channel name used in logs.
    fn channel(&self) -> &'static str;

    async fn send(&self, subject: &str, message: &str) -> Result<(), NotifyError>;
}

/// Sends one message to every configured channel.
#[derive(Clone, Default)]
pub struct NotificationFanout {
    channels: Vec<Arc<dyn Notifier>>,
}

impl NotificationFanout {
    pub fn new(channels: Vec<Arc<dyn Notifier>>) -> Self {
        Self { channels }
    }

    pub fn with_channel(mut self, channel: Arc<dyn Notifier>) -> Self {
        self.channels.push(channel);
        self
    }

    /// Deliver to all channels and return how many accepted the message.
    pub async fn broadcast(&self, subject: &str, message: &str) -> usize {
        let mut delivered = 0;

        for channel in &self.channels {
            match channel.send(subject, message).await {
                Ok(()) => {
                    delivered += 1;
                    tracing::info!(channel = channel.channel(), "Notification sent");
                }
                Err(e) => {
                    metrics::record_collaborator_error("notify");
                    tracing::error!(channel = channel.channel(), error = %e, "Failed to send notification");
                }
            }
        }

        delivered
    }
}
