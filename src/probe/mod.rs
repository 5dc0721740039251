//! Endpoint health probing.
//!
//! # Data Flow
//! ```text
//! EndpointSpec + PollPolicy (policy.rs)
//!     → EndpointProbe::poll (poll.rs)
//!         → HttpProber::get, once per attempt (http.rs)
//!         → 200 ends the loop with `true`
//!         → anything else counts as a failed attempt
//!         → retry ceiling or missing retry period ends the loop with `false`
//! ```
//!
//! # Design Decisions
//! - An unhealthy endpoint is an ordinary `false`, never an error
//! - Only status 200 is healthy; other 2xx codes are not
//! - The transport is a trait so orchestration can run against scripted probes

pub mod http;
pub mod policy;
pub mod poll;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use http::ReqwestProber;
pub use policy::{EndpointSpec, PollPolicy};
pub use poll::EndpointProbe;

/// User-Agent sent with every health check.
pub const USER_AGENT: &str = "DR-Failover-HealthCheck/1.0";

/// Transport-level reasons a single probe attempt failed.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// No response within the attempt timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection refused, DNS failure, TLS failure and similar.
    #[error("connection error: {0}")]
    Transport(String),

    /// The probe client could not be constructed.
    #[error("probe client error: {0}")]
    Client(String),
}

/// Single HTTP GET used by the poll loop.
#[async_trait]
pub trait HttpProber: Send + Sync {
    /// Issue one GET and return the response status code.
    async fn get(&self, url: &str, timeout: Duration) -> Result<u16, ProbeError>;
}
