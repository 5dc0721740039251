//! SNS topic channel.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sns::error::DisplayErrorContext;
use aws_sdk_sns::Client;

use crate::notify::{Notifier, NotifyError};

/// Publishes notifications to an SNS topic.
#[derive(Debug, Clone)]
pub struct SnsTopic {
    client: Client,
    topic_arn: String,
}

impl SnsTopic {
    pub fn new(sdk_config: &SdkConfig, topic_arn: impl Into<String>) -> Self {
        Self {
            client: Client::new(sdk_config),
            topic_arn: topic_arn.into(),
        }
    }
}

#[async_trait]
impl Notifier for SnsTopic {
    fn channel(&self) -> &'static str {
        "sns"
    }

    async fn send(&self, subject: &str, message: &str) -> Result<(), NotifyError> {
        let output = self
            .client
            .publish()
            .topic_arn(&self.topic_arn)
            .subject(subject)
            .message(message)
            .send()
            .await
            .map_err(|e| NotifyError::Topic(DisplayErrorContext(&e).to_string()))?;

        tracing::debug!(message_id = ?output.message_id(), "Published to topic");
        Ok(())
    }
}
