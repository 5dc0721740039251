//! Compute-group capacity management.
//!
//! # Responsibilities
//! - Write a desired capacity (and optionally a minimum size) to a named group
//! - Read the current desired capacity of a named group
//!
//! # Design Decisions
//! - Writes are idempotent upserts of desired state
//! - Reads are never cached; every status check goes to the API
//! - Region is part of every call; one controller serves both regions

pub mod autoscaling;

use async_trait::async_trait;
use thiserror::Error;

pub use autoscaling::AutoScalingController;

/// A desired-state write to a compute group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityTarget {
    pub region: String,
    pub group_name: String,
    pub desired_capacity: i32,
    /// When set, the group's minimum size is written alongside the desired
    /// capacity so the group cannot scale back past it.
    pub min_size: Option<i32>,
}

impl CapacityTarget {
    pub fn new(region: impl Into<String>, group_name: impl Into<String>, desired_capacity: i32) -> Self {
        Self {
            region: region.into(),
            group_name: group_name.into(),
            desired_capacity,
            min_size: None,
        }
    }

    /// Also pin the minimum size to the desired capacity.
    pub fn pinned(mut self) -> Self {
        self.min_size = Some(self.desired_capacity);
        self
    }
}

/// Desired capacity of a group at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacitySnapshot {
    pub group_name: String,
    pub desired_capacity: i32,
}

/// Errors from the capacity API.
#[derive(Debug, Error)]
pub enum CapacityError {
    #[error("compute group '{0}' not found")]
    GroupNotFound(String),

    #[error("no capacity client for region '{0}'")]
    UnknownRegion(String),

    #[error("capacity API error: {0}")]
    Api(String),
}

/// Reads and writes compute-group capacity.
#[async_trait]
pub trait CapacityController: Send + Sync {
    async fn set_desired_capacity(&self, target: &CapacityTarget) -> Result<(), CapacityError>;

    async fn get_desired_capacity(
        &self,
        region: &str,
        group_name: &str,
    ) -> Result<CapacitySnapshot, CapacityError>;
}
