//! Operator-directed failover, failback and status.
//!
//! Each action is a short, ordered list of capacity and DNS calls. A fault
//! stops the list and is reported; calls already made are not undone.

use std::sync::Arc;

use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use crate::capacity::{CapacityController, CapacityError, CapacityTarget};
use crate::config::{ControllerConfig, FailbackSettings};
use crate::dns::{host_of, DnsController, DnsCutover, DnsError};
use crate::observability::metrics;
use crate::orchestrator::types::{Action, ActionResponse, SiteStatus};

/// Fault raised by one of the collaborator calls of an action.
#[derive(Debug, Error)]
pub enum FailbackError {
    #[error(transparent)]
    Capacity(#[from] CapacityError),

    #[error(transparent)]
    Dns(#[from] DnsError),
}

/// Group names, regions and record settings for failback actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailbackPlan {
    pub primary_region: String,
    pub primary_group: String,
    pub standby_region: String,
    pub standby_group: String,
    pub primary_capacity: i32,
    pub restore: DnsCutover,
}

impl FailbackPlan {
    pub fn from_settings(settings: &FailbackSettings, config: &ControllerConfig) -> Self {
        Self {
            primary_region: settings.primary_region.clone(),
            primary_group: settings.primary_asg_name.clone(),
            standby_region: settings.dr_region.clone(),
            standby_group: settings.dr_asg_name.clone(),
            primary_capacity: config.failback.primary_capacity,
            restore: DnsCutover {
                hosted_zone: settings.hosted_zone_id.clone(),
                record_name: host_of(&settings.domain_name),
                target_host: host_of(&settings.primary_domain_name),
                ttl: config.dns.failback_ttl_secs,
            },
        }
    }
}

/// Dispatches operator actions against both regions.
pub struct FailbackOrchestrator {
    plan: FailbackPlan,
    capacity: Arc<dyn CapacityController>,
    dns: Arc<dyn DnsController>,
}

impl FailbackOrchestrator {
    pub fn new(
        plan: FailbackPlan,
        capacity: Arc<dyn CapacityController>,
        dns: Arc<dyn DnsController>,
    ) -> Self {
        Self { plan, capacity, dns }
    }

    pub fn plan(&self) -> &FailbackPlan {
        &self.plan
    }

    /// Parse `draction` and run it. Unknown actions are rejected before any
    /// collaborator is called.
    pub async fn execute(&self, draction: &str) -> ActionResponse {
        match draction.parse::<Action>() {
            Ok(action) => self.dispatch(action).await,
            Err(invalid) => {
                tracing::warn!(draction = %invalid.0, "Rejected invalid action");
                let response = ActionResponse::bad_request(invalid.to_string());
                metrics::record_action("invalid", response.status_code);
                response
            }
        }
    }

    /// Run a parsed action.
    pub async fn dispatch(&self, action: Action) -> ActionResponse {
        let span = tracing::info_span!("dr_action", %action, run_id = %Uuid::new_v4());

        let response = async {
            let result = match action {
                Action::Failover => self.trigger_failover().await,
                Action::Failback => self.failback().await,
                Action::Status => Ok(self.status().await),
            };

            match result {
                Ok(body) => ActionResponse::ok(body),
                Err(e) => {
                    tracing::error!(error = %e, "Error during {}", action);
                    ActionResponse::internal_error(format!("Error during {}: {}", action, e))
                }
            }
        }
        .instrument(span)
        .await;

        metrics::record_action(action.as_str(), response.status_code);
        response
    }

    /// Manual kill switch: drain the primary group. DNS is left alone.
    async fn trigger_failover(&self) -> Result<String, FailbackError> {
        let target = CapacityTarget::new(&self.plan.primary_region, &self.plan.primary_group, 0);
        self.capacity.set_desired_capacity(&target).await?;
        tracing::info!(group = %target.group_name, region = %target.region, "Scaled down primary group");

        Ok("Failover triggered successfully.".to_string())
    }

    /// Primary up, standby down (min size released), then DNS back to primary.
    async fn failback(&self) -> Result<String, FailbackError> {
        let primary = CapacityTarget::new(
            &self.plan.primary_region,
            &self.plan.primary_group,
            self.plan.primary_capacity,
        );
        self.capacity.set_desired_capacity(&primary).await?;
        tracing::info!(group = %primary.group_name, region = %primary.region, "Scaled up primary group");

        let standby = CapacityTarget::new(&self.plan.standby_region, &self.plan.standby_group, 0).pinned();
        self.capacity.set_desired_capacity(&standby).await?;
        tracing::info!(group = %standby.group_name, region = %standby.region, "Scaled down standby group");

        self.dns.upsert_cname(&self.plan.restore).await?;

        Ok("Failback completed successfully.".to_string())
    }

    /// Two independent reads; a failed read is rendered as unknown.
    async fn status(&self) -> String {
        let primary = self
            .read_capacity(&self.plan.primary_region, &self.plan.primary_group)
            .await;
        let standby = self
            .read_capacity(&self.plan.standby_region, &self.plan.standby_group)
            .await;

        SiteStatus::classify(primary, standby).describe(primary, standby)
    }

    async fn read_capacity(&self, region: &str, group: &str) -> Option<i32> {
        match self.capacity.get_desired_capacity(region, group).await {
            Ok(snapshot) => Some(snapshot.desired_capacity),
            Err(e) => {
                metrics::record_collaborator_error("capacity");
                tracing::error!(group, region, error = %e, "Error fetching desired capacity");
                None
            }
        }
    }
}
