//! Automatic failover check.
//!
//! # Sequence
//! ```text
//! ProbePrimary ──healthy──▶ done (PrimaryHealthy)
//!      │ unhealthy
//!      ▼
//! ConfirmRegionDown ──healthy──▶ done (NotCorroborated)
//!      │ unhealthy
//!      ▼
//! ScaleStandby (fault logged, sequence continues)
//!      ▼
//! WaitForStandby ──never healthy──▶ done (StandbyUnavailable)
//!      │ healthy
//!      ▼
//! CutoverDns ──fault──▶ done (CutoverFailed)
//!      │
//!      ▼
//! Notify ─▶ done (FailedOver)
//! ```
//!
//! Each side effect happens at most once per run and only in this order.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::Instrument;
use uuid::Uuid;

use crate::capacity::{CapacityController, CapacityTarget};
use crate::config::{ControllerConfig, FailoverSettings};
use crate::dns::{host_of, DnsController, DnsCutover};
use crate::notify::NotificationFanout;
use crate::observability::metrics;
use crate::orchestrator::types::{format_timestamp, FailoverEvent, FailoverOutcome};
use crate::probe::{EndpointProbe, EndpointSpec, PollPolicy};

/// Everything one failover check needs, resolved from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailoverPlan {
    pub primary: EndpointSpec,
    pub corroboration: EndpointSpec,
    pub standby: EndpointSpec,
    pub standby_policy: PollPolicy,
    pub scale_standby: CapacityTarget,
    pub cutover: DnsCutover,
    pub application_name: String,
    pub notify_on_failure: bool,
}

impl FailoverPlan {
    /// Build the plan. `standby_region` is the region the DR group lives in.
    pub fn from_settings(
        settings: &FailoverSettings,
        config: &ControllerConfig,
        standby_region: &str,
    ) -> Self {
        let check_timeout = Duration::from_secs(config.probe.check_timeout_secs);
        let standby = EndpointSpec::new(
            settings.dr_endpoint.clone(),
            Duration::from_secs(config.probe.standby_timeout_secs),
        );
        let standby_policy = standby.with_retries(
            Duration::from_secs(config.probe.standby_retry_period_secs),
            config.probe.standby_max_attempts,
        );

        Self {
            primary: EndpointSpec::new(settings.primary_endpoint.clone(), check_timeout),
            corroboration: EndpointSpec::new(settings.corroboration_url(&config.failover), check_timeout),
            standby,
            standby_policy,
            scale_standby: CapacityTarget::new(
                standby_region,
                settings.dr_asg_name.clone(),
                config.failover.standby_capacity,
            )
            .pinned(),
            cutover: DnsCutover {
                hosted_zone: settings.hosted_zone_id.clone(),
                record_name: host_of(&settings.domain_name),
                target_host: host_of(&settings.dr_endpoint),
                ttl: config.dns.failover_ttl_secs,
            },
            application_name: config.failover.application_name.clone(),
            notify_on_failure: config.failover.notify_on_failure,
        }
    }
}

/// Runs the failover decision sequence. Holds no state between runs.
pub struct FailoverOrchestrator {
    plan: FailoverPlan,
    probe: EndpointProbe,
    capacity: Arc<dyn CapacityController>,
    dns: Arc<dyn DnsController>,
    notifier: NotificationFanout,
}

impl FailoverOrchestrator {
    pub fn new(
        plan: FailoverPlan,
        probe: EndpointProbe,
        capacity: Arc<dyn CapacityController>,
        dns: Arc<dyn DnsController>,
        notifier: NotificationFanout,
    ) -> Self {
        Self {
            plan,
            probe,
            capacity,
            dns,
            notifier,
        }
    }

    pub fn plan(&self) -> &FailoverPlan {
        &self.plan
    }

    /// Execute one failover check from start to finish.
    pub async fn run(&self) -> FailoverEvent {
        let span = tracing::info_span!("failover_check", run_id = %Uuid::new_v4());
        let event = self.run_steps().instrument(span).await;

        metrics::record_failover_run(event.outcome.as_str());
        event
    }

    async fn run_steps(&self) -> FailoverEvent {
        let plan = &self.plan;

        let primary_healthy = self
            .probe
            .poll(&plan.primary, &plan.primary.single_attempt())
            .await;
        tracing::info!(endpoint = %plan.primary.url, primary_healthy, "Primary endpoint probed");

        if primary_healthy {
            return FailoverEvent::new(
                FailoverOutcome::PrimaryHealthy,
                "Primary endpoint is healthy; no action taken",
            );
        }

        let corroboration_healthy = self
            .probe
            .poll(&plan.corroboration, &plan.corroboration.single_attempt())
            .await;
        tracing::info!(
            endpoint = %plan.corroboration.url,
            corroboration_healthy,
            "Corroboration endpoint probed"
        );

        if corroboration_healthy {
            tracing::warn!("Primary endpoint unhealthy but region looks up; not failing over");
            return FailoverEvent::new(
                FailoverOutcome::NotCorroborated,
                "Primary endpoint is unhealthy but the corroboration signal is healthy; no action taken",
            );
        }

        self.scale_standby().await;

        let standby_healthy = self.probe.poll(&plan.standby, &plan.standby_policy).await;
        if !standby_healthy {
            return self.report_standby_unavailable().await;
        }

        if let Err(e) = self.dns.upsert_cname(&plan.cutover).await {
            metrics::record_collaborator_error("dns");
            tracing::error!(
                record = %plan.cutover.record_name,
                target = %plan.cutover.target_host,
                error = %e,
                "DNS cutover failed"
            );
            return FailoverEvent::new(
                FailoverOutcome::CutoverFailed,
                format!("Standby is healthy but DNS cutover failed: {}", e),
            );
        }

        let failed_over_at = Utc::now();
        let subject = format!("{} failed over to DR", plan.application_name);
        let message = format!(
            "{} failed over to DR at {}",
            plan.application_name,
            format_timestamp(&failed_over_at)
        );
        tracing::info!(target_host = %plan.cutover.target_host, "Failover complete");

        self.notifier.broadcast(&subject, &message).await;
        FailoverEvent::at(failed_over_at, FailoverOutcome::FailedOver, message)
    }

    /// A fault here is not fatal: the group may already be at capacity, and the
    /// standby poll decides whether to cut over.
    async fn scale_standby(&self) {
        let target = &self.plan.scale_standby;
        tracing::info!(
            group = %target.group_name,
            region = %target.region,
            desired_capacity = target.desired_capacity,
            "Primary region confirmed down, scaling standby"
        );

        if let Err(e) = self.capacity.set_desired_capacity(target).await {
            metrics::record_collaborator_error("capacity");
            tracing::error!(group = %target.group_name, error = %e, "Standby scale-up failed, continuing");
        }
    }

    async fn report_standby_unavailable(&self) -> FailoverEvent {
        let plan = &self.plan;
        let now = Utc::now();
        let attempts = plan.standby_policy.attempt_ceiling().unwrap_or(1);
        let message = format!(
            "{} failover to DR failed at {}: standby endpoint {} did not become healthy after {} attempts",
            plan.application_name,
            format_timestamp(&now),
            plan.standby.url,
            attempts
        );
        tracing::error!(endpoint = %plan.standby.url, attempts, "Standby never became healthy; DNS unchanged");

        if plan.notify_on_failure {
            let subject = format!("{} failover to DR failed", plan.application_name);
            self.notifier.broadcast(&subject, &message).await;
        }

        FailoverEvent::at(now, FailoverOutcome::StandbyUnavailable, message)
    }
}
