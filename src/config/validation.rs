//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, TTLs > 0, capacities >= 0)
//! - Check endpoint URLs parse before any probe runs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function over the parsed config
//! - Runs before config is accepted into the system

use std::fmt;
use url::Url;

use crate::config::schema::{ControllerConfig, FailoverSettings};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate the file-backed tunables.
pub fn validate_config(config: &ControllerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.probe.check_timeout_secs == 0 {
        errors.push(ValidationError::new("probe.check_timeout_secs", "must be greater than 0"));
    }
    if config.probe.standby_timeout_secs == 0 {
        errors.push(ValidationError::new("probe.standby_timeout_secs", "must be greater than 0"));
    }
    if config.probe.standby_max_attempts == 0 {
        errors.push(ValidationError::new("probe.standby_max_attempts", "must be greater than 0"));
    }
    if config.failover.standby_capacity < 0 {
        errors.push(ValidationError::new("failover.standby_capacity", "must not be negative"));
    }
    if config.failover.notify_timeout_secs == 0 {
        errors.push(ValidationError::new("failover.notify_timeout_secs", "must be greater than 0"));
    }
    if config.failback.primary_capacity < 0 {
        errors.push(ValidationError::new("failback.primary_capacity", "must not be negative"));
    }
    if config.dns.failover_ttl_secs == 0 {
        errors.push(ValidationError::new("dns.failover_ttl_secs", "must be greater than 0"));
    }
    if config.dns.failback_ttl_secs == 0 {
        errors.push(ValidationError::new("dns.failback_ttl_secs", "must be greater than 0"));
    }
    if config.scheduler.interval_secs == 0 {
        errors.push(ValidationError::new("scheduler.interval_secs", "must be greater than 0"));
    }
    if let Some(endpoint) = &config.failover.corroboration_endpoint {
        check_url(&mut errors, "failover.corroboration_endpoint", endpoint);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate the environment-backed failover settings.
pub fn validate_failover_settings(settings: &FailoverSettings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url(&mut errors, "PRIMARY_ENDPOINT", &settings.primary_endpoint);
    check_url(&mut errors, "DR_ENDPOINT", &settings.dr_endpoint);
    check_url(&mut errors, "SLACK_WEBHOOK_URL", &settings.slack_webhook_url);
    if let Some(endpoint) = &settings.corroboration_endpoint {
        check_url(&mut errors, "CORROBORATION_ENDPOINT", endpoint);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            field,
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(field, format!("invalid URL: {}", e))),
    }
}
