//! Startup wiring.
//!
//! # Responsibilities
//! - Resolve AWS SDK configuration per region
//! - Build the concrete collaborators
//! - Hand them to the orchestrators as trait objects
//!
//! # Design Decisions
//! - Fail fast: a region that cannot be resolved is fatal
//! - SNS clients use the region embedded in the topic ARN

use std::sync::Arc;
use std::time::Duration;

use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_autoscaling::config::Region;
use thiserror::Error;

use crate::capacity::AutoScalingController;
use crate::config::{ConfigError, ControllerConfig, FailbackSettings, FailoverSettings};
use crate::dns::Route53Controller;
use crate::notify::{NotificationFanout, NotifyError, SlackWebhook, SnsTopic};
use crate::orchestrator::{FailbackOrchestrator, FailbackPlan, FailoverOrchestrator, FailoverPlan};
use crate::probe::{EndpointProbe, ProbeError, ReqwestProber};

/// Fatal errors while building an orchestrator.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("health probe setup failed: {0}")]
    Probe(#[from] ProbeError),

    #[error("notification setup failed: {0}")]
    Notify(#[from] NotifyError),

    #[error("DR region unknown: set DR_REGION or configure a default AWS region")]
    MissingRegion,
}

/// Load SDK configuration, pinned to `region` when given.
pub async fn load_sdk_config(region: Option<&str>) -> SdkConfig {
    let loader = aws_config::defaults(BehaviorVersion::latest());
    let loader = match region {
        Some(region) => loader.region(Region::new(region.to_string())),
        None => loader,
    };
    loader.load().await
}

/// Region field of an ARN (`arn:aws:sns:<region>:<account>:<name>`).
pub fn arn_region(arn: &str) -> Option<&str> {
    arn.split(':').nth(3).filter(|region| !region.is_empty())
}

/// Build the automatic failover orchestrator from the environment settings.
pub async fn build_failover(
    settings: &FailoverSettings,
    config: &ControllerConfig,
) -> Result<FailoverOrchestrator, StartupError> {
    let default_config = load_sdk_config(None).await;

    let standby_region = match &settings.dr_region {
        Some(region) => region.clone(),
        None => default_config
            .region()
            .map(|region| region.to_string())
            .ok_or(StartupError::MissingRegion)?,
    };
    let standby_config = load_sdk_config(Some(&standby_region)).await;

    let topic_config = match arn_region(&settings.sns_topic_arn) {
        Some(region) => load_sdk_config(Some(region)).await,
        None => default_config.clone(),
    };

    let capacity = AutoScalingController::new().with_region(standby_region.clone(), &standby_config);
    let dns = Route53Controller::new(&default_config);
    let webhook = SlackWebhook::new(
        settings.slack_webhook_url.clone(),
        Duration::from_secs(config.failover.notify_timeout_secs),
    )?;
    let notifier = NotificationFanout::default()
        .with_channel(Arc::new(SnsTopic::new(&topic_config, settings.sns_topic_arn.clone())))
        .with_channel(Arc::new(webhook));
    let probe = EndpointProbe::new(Arc::new(ReqwestProber::new()?));

    let plan = FailoverPlan::from_settings(settings, config, &standby_region);
    tracing::info!(
        primary = %plan.primary.url,
        corroboration = %plan.corroboration.url,
        standby = %plan.standby.url,
        standby_region = %standby_region,
        "Failover orchestrator ready"
    );

    Ok(FailoverOrchestrator::new(
        plan,
        probe,
        Arc::new(capacity),
        Arc::new(dns),
        notifier,
    ))
}

/// Build the operator-directed failback orchestrator.
pub async fn build_failback(
    settings: &FailbackSettings,
    config: &ControllerConfig,
) -> FailbackOrchestrator {
    let primary_config = load_sdk_config(Some(&settings.primary_region)).await;
    let standby_config = load_sdk_config(Some(&settings.dr_region)).await;

    let capacity = AutoScalingController::new()
        .with_region(settings.primary_region.clone(), &primary_config)
        .with_region(settings.dr_region.clone(), &standby_config);
    let dns = Route53Controller::new(&primary_config);

    let plan = FailbackPlan::from_settings(settings, config);
    tracing::info!(
        primary_group = %plan.primary_group,
        standby_group = %plan.standby_group,
        "Failback orchestrator ready"
    );

    FailbackOrchestrator::new(plan, Arc::new(capacity), Arc::new(dns))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arn_region() {
        assert_eq!(
            arn_region("arn:aws:sns:us-east-1:123456789012:MyTopic"),
            Some("us-east-1")
        );
        assert_eq!(arn_region("arn:aws:sns::123456789012:MyTopic"), None);
        assert_eq!(arn_region("not-an-arn"), None);
    }
}
