//! Shared orchestration types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Operator directive accepted by the failback orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Failover,
    Failback,
    Status,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Failover => "failover",
            Action::Failback => "failback",
            Action::Status => "status",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a directive is not one of the known actions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid draction. Use 'failover', 'failback', or 'status'.")]
pub struct InvalidAction(pub String);

impl FromStr for Action {
    type Err = InvalidAction;

    /// Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "failover" => Ok(Action::Failover),
            "failback" => Ok(Action::Failback),
            "status" => Ok(Action::Status),
            other => Err(InvalidAction(other.to_string())),
        }
    }
}

/// Request accepted by the failback entry point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ActionRequest {
    #[serde(default)]
    pub draction: Option<String>,
}

impl ActionRequest {
    /// Lenient read of an arbitrary JSON payload. A missing or non-string
    /// `draction` yields `None`.
    pub fn from_value(value: &serde_json::Value) -> Self {
        Self {
            draction: value
                .get("draction")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string),
        }
    }
}

/// Structured result of a failback-orchestrator action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ActionResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl ActionResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self { status_code: 200, body: body.into() }
    }

    pub fn bad_request(body: impl Into<String>) -> Self {
        Self { status_code: 400, body: body.into() }
    }

    pub fn internal_error(body: impl Into<String>) -> Self {
        Self { status_code: 500, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

/// Classification of the two desired-capacity readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteStatus {
    /// Primary group has no capacity, whatever the standby reads.
    Down,
    /// Primary carries capacity and the standby does not.
    Up,
    /// Both groups carry capacity.
    FailoverInProgress,
    /// A reading failed and the primary is not known to be empty.
    Unknown,
}

impl SiteStatus {
    /// Classify two independent, possibly inconsistent readings.
    pub fn classify(primary: Option<i32>, standby: Option<i32>) -> Self {
        match (primary, standby) {
            (Some(0), _) => SiteStatus::Down,
            (Some(_), Some(0)) => SiteStatus::Up,
            (Some(_), Some(_)) => SiteStatus::FailoverInProgress,
            _ => SiteStatus::Unknown,
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            SiteStatus::Down => "Primary site is down.",
            SiteStatus::Up => "Primary site is up.",
            SiteStatus::FailoverInProgress => "Failover in progress.",
            SiteStatus::Unknown => "Primary site status is unknown.",
        }
    }

    /// Headline followed by both readings, `unknown` for a failed read.
    pub fn describe(&self, primary: Option<i32>, standby: Option<i32>) -> String {
        format!(
            "{} primary_capacity={}, dr_capacity={}",
            self.headline(),
            render_capacity(primary),
            render_capacity(standby)
        )
    }
}

fn render_capacity(capacity: Option<i32>) -> String {
    capacity.map_or_else(|| "unknown".to_string(), |c| c.to_string())
}

/// How a failover check ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailoverOutcome {
    /// Primary answered; nothing to do.
    PrimaryHealthy,
    /// Primary failed but the corroboration signal was healthy.
    NotCorroborated,
    /// Standby healthy and DNS points at it.
    FailedOver,
    /// Standby never became healthy; DNS untouched.
    StandbyUnavailable,
    /// Standby healthy but the DNS upsert failed.
    CutoverFailed,
}

impl FailoverOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailoverOutcome::PrimaryHealthy => "primary_healthy",
            FailoverOutcome::NotCorroborated => "not_corroborated",
            FailoverOutcome::FailedOver => "failed_over",
            FailoverOutcome::StandbyUnavailable => "standby_unavailable",
            FailoverOutcome::CutoverFailed => "cutover_failed",
        }
    }
}

/// Summary of one failover check. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailoverEvent {
    pub timestamp: DateTime<Utc>,
    pub outcome: FailoverOutcome,
    pub message: String,
}

impl FailoverEvent {
    pub fn new(outcome: FailoverOutcome, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            outcome,
            message: message.into(),
        }
    }

    pub fn at(timestamp: DateTime<Utc>, outcome: FailoverOutcome, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            outcome,
            message: message.into(),
        }
    }
}

/// `2025-01-28 09:59:00 UTC`
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_action_parsing() {
        assert_eq!("failover".parse::<Action>(), Ok(Action::Failover));
        assert_eq!("failback".parse::<Action>(), Ok(Action::Failback));
        assert_eq!("status".parse::<Action>(), Ok(Action::Status));
        assert!("rollback".parse::<Action>().is_err());
        assert!("Status".parse::<Action>().is_err());
        assert!("".parse::<Action>().is_err());
    }

    #[test]
    fn test_classification() {
        assert_eq!(SiteStatus::classify(Some(0), Some(2)), SiteStatus::Down);
        assert_eq!(SiteStatus::classify(Some(0), Some(0)), SiteStatus::Down);
        assert_eq!(SiteStatus::classify(Some(2), Some(0)), SiteStatus::Up);
        assert_eq!(SiteStatus::classify(Some(2), Some(2)), SiteStatus::FailoverInProgress);
        assert_eq!(SiteStatus::classify(None, Some(2)), SiteStatus::Unknown);
        assert_eq!(SiteStatus::classify(Some(0), None), SiteStatus::Down);
        assert_eq!(SiteStatus::classify(None, Some(0)), SiteStatus::Unknown);
        assert_eq!(SiteStatus::classify(None, None), SiteStatus::Unknown);
    }

    #[test]
    fn test_describe_renders_unknown() {
        let status = SiteStatus::classify(Some(2), None);
        assert_eq!(
            status.describe(Some(2), None),
            "Primary site status is unknown. primary_capacity=2, dr_capacity=unknown"
        );
    }

    #[test]
    fn test_response_wire_format() {
        let json = serde_json::to_value(ActionResponse::ok("Failback completed successfully.")).unwrap();
        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["body"], "Failback completed successfully.");

        let request: ActionRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.draction, None);
    }

    #[test]
    fn test_lenient_request_read() {
        let read = |raw: &str| ActionRequest::from_value(&serde_json::from_str(raw).unwrap()).draction;

        assert_eq!(read(r#"{"draction": "failback"}"#).as_deref(), Some("failback"));
        assert_eq!(read(r#"{"draction": 5}"#), None);
        assert_eq!(read(r#"{"draction": null}"#), None);
        assert_eq!(read(r#"["failover"]"#), None);
    }

    #[test]
    fn test_timestamp_format() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 28, 9, 59, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "2025-01-28 09:59:00 UTC");
    }
}
