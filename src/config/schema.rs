//! Configuration schema definitions.
//!
//! Two kinds of configuration live here:
//! - [`ControllerConfig`]: tunables read from an optional TOML file. Every field
//!   has a default so a missing file or a partial file is valid.
//! - [`FailoverSettings`] / [`FailbackSettings`]: deployment settings read from
//!   environment variables. These have no defaults; see `loader.rs`.

use serde::{Deserialize, Serialize};

/// Root tunables for the controller.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ControllerConfig {
    /// Health-check timeouts and the standby poll policy.
    pub probe: ProbeConfig,

    /// Automatic failover behavior.
    pub failover: FailoverConfig,

    /// Operator-directed failback behavior.
    pub failback: FailbackConfig,

    /// DNS record settings.
    pub dns: DnsConfig,

    /// Built-in periodic runner (`watch`).
    pub scheduler: SchedulerConfig,

    /// Admin HTTP API.
    pub admin: AdminConfig,

    /// Logging and metrics.
    pub observability: ObservabilityConfig,
}

/// Health-check settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Timeout of the single-attempt primary and corroboration probes, in seconds.
    pub check_timeout_secs: u64,

    /// Per-attempt timeout while waiting for the standby, in seconds.
    pub standby_timeout_secs: u64,

    /// Wait between standby attempts, in seconds.
    pub standby_retry_period_secs: u64,

    /// Maximum number of standby attempts.
    pub standby_max_attempts: u32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            check_timeout_secs: 10,
            standby_timeout_secs: 10,
            standby_retry_period_secs: 30,
            standby_max_attempts: 20,
        }
    }
}

/// Automatic failover tunables.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FailoverConfig {
    /// Desired capacity written to the standby group on failover.
    pub standby_capacity: i32,

    /// Independent endpoint used to corroborate a primary outage.
    /// Defaults to the regional DynamoDB endpoint of the primary region.
    pub corroboration_endpoint: Option<String>,

    /// Send a notification when the standby never becomes healthy.
    pub notify_on_failure: bool,

    /// Label used in notification subjects and bodies.
    pub application_name: String,

    /// Upper bound on one chat webhook delivery, in seconds.
    pub notify_timeout_secs: u64,
}

impl Default for FailoverConfig {
    fn default() -> Self {
        Self {
            standby_capacity: 2,
            corroboration_endpoint: None,
            notify_on_failure: false,
            application_name: "Application".to_string(),
            notify_timeout_secs: 10,
        }
    }
}

/// Failback tunables.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FailbackConfig {
    /// Desired capacity restored on the primary group.
    pub primary_capacity: i32,
}

impl Default for FailbackConfig {
    fn default() -> Self {
        Self { primary_capacity: 2 }
    }
}

/// DNS record TTLs, one per cutover direction.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DnsConfig {
    /// TTL of the record written when cutting over to the standby.
    pub failover_ttl_secs: u32,

    /// TTL of the record written when failing back to the primary.
    pub failback_ttl_secs: u32,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            failover_ttl_secs: 30,
            failback_ttl_secs: 60,
        }
    }
}

/// Periodic failover check settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Seconds between the start of two failover checks.
    pub interval_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { interval_secs: 60 }
    }
}

/// Default admin API key. Anyone who knows it can drive operator actions.
pub const PLACEHOLDER_API_KEY: &str = "CHANGE_ME_IN_PRODUCTION";

/// Admin API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// API key for authentication (Bearer token).
    pub api_key: String,

    /// Admin API bind address.
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            // WARNING: This is a placeholder! Change this in production.
            api_key: PLACEHOLDER_API_KEY.to_string(),
            bind_address: "127.0.0.1:8081".to_string(),
            request_timeout_secs: 60,
        }
    }
}

impl AdminConfig {
    /// True while the API key is still the shipped placeholder.
    pub fn uses_placeholder_key(&self) -> bool {
        self.api_key == PLACEHOLDER_API_KEY
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub json_logs: bool,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Deployment settings for the automatic failover path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailoverSettings {
    pub primary_region: String,
    pub primary_endpoint: String,
    pub dr_endpoint: String,
    /// Region of the DR group. `None` means the SDK's default region.
    pub dr_region: Option<String>,
    pub dr_asg_name: String,
    pub hosted_zone_id: String,
    pub domain_name: String,
    pub sns_topic_arn: String,
    pub slack_webhook_url: String,
    pub corroboration_endpoint: Option<String>,
}

impl FailoverSettings {
    /// Endpoint probed to confirm a primary outage.
    ///
    /// Precedence: environment, then config file, then the regional
    /// DynamoDB endpoint of the primary region.
    pub fn corroboration_url(&self, config: &FailoverConfig) -> String {
        self.corroboration_endpoint
            .clone()
            .or_else(|| config.corroboration_endpoint.clone())
            .unwrap_or_else(|| format!("https://dynamodb.{}.amazonaws.com", self.primary_region))
    }
}

/// Deployment settings for the failback path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailbackSettings {
    pub primary_region: String,
    pub dr_region: String,
    pub primary_asg_name: String,
    pub dr_asg_name: String,
    pub domain_name: String,
    pub primary_domain_name: String,
    pub hosted_zone_id: String,
}
