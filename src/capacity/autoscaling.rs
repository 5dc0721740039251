//! AWS Auto Scaling adapter.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_autoscaling::error::DisplayErrorContext;
use aws_sdk_autoscaling::Client;

use crate::capacity::{CapacityController, CapacityError, CapacitySnapshot, CapacityTarget};

/// [`CapacityController`] over Auto Scaling groups, one client per region.
#[derive(Debug, Clone, Default)]
pub struct AutoScalingController {
    clients: HashMap<String, Client>,
}

impl AutoScalingController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client for `region` built from `sdk_config`.
    pub fn with_region(mut self, region: impl Into<String>, sdk_config: &SdkConfig) -> Self {
        self.clients.insert(region.into(), Client::new(sdk_config));
        self
    }

    fn client(&self, region: &str) -> Result<&Client, CapacityError> {
        self.clients
            .get(region)
            .ok_or_else(|| CapacityError::UnknownRegion(region.to_string()))
    }
}

#[async_trait]
impl CapacityController for AutoScalingController {
    async fn set_desired_capacity(&self, target: &CapacityTarget) -> Result<(), CapacityError> {
        let client = self.client(&target.region)?;

        match target.min_size {
            Some(min_size) => {
                client
                    .update_auto_scaling_group()
                    .auto_scaling_group_name(&target.group_name)
                    .min_size(min_size)
                    .desired_capacity(target.desired_capacity)
                    .send()
                    .await
                    .map_err(|e| CapacityError::Api(DisplayErrorContext(&e).to_string()))?;
            }
            None => {
                client
                    .set_desired_capacity()
                    .auto_scaling_group_name(&target.group_name)
                    .desired_capacity(target.desired_capacity)
                    .honor_cooldown(false)
                    .send()
                    .await
                    .map_err(|e| CapacityError::Api(DisplayErrorContext(&e).to_string()))?;
            }
        }

        tracing::info!(
            group = %target.group_name,
            region = %target.region,
            desired_capacity = target.desired_capacity,
            min_size = ?target.min_size,
            "Desired capacity updated"
        );
        Ok(())
    }

    async fn get_desired_capacity(
        &self,
        region: &str,
        group_name: &str,
    ) -> Result<CapacitySnapshot, CapacityError> {
        let output = self
            .client(region)?
            .describe_auto_scaling_groups()
            .auto_scaling_group_names(group_name)
            .send()
            .await
            .map_err(|e| CapacityError::Api(DisplayErrorContext(&e).to_string()))?;

        let group = output
            .auto_scaling_groups()
            .first()
            .ok_or_else(|| CapacityError::GroupNotFound(group_name.to_string()))?;

        let desired: Option<i32> = group.desired_capacity().into();
        let desired_capacity = desired.ok_or_else(|| {
            CapacityError::Api(format!("group '{}' reported no desired capacity", group_name))
        })?;

        Ok(CapacitySnapshot {
            group_name: group_name.to_string(),
            desired_capacity,
        })
    }
}
