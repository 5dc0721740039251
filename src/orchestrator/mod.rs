//! Failover and failback orchestration.
//!
//! # Data Flow
//! ```text
//! scheduler / `check` command
//!     → failover.rs: probe → confirm → scale → wait → cutover → notify
//!
//! operator (`action` command / admin API)
//!     → failback.rs: failover | failback | status → {statusCode, body}
//! ```
//!
//! # Design Decisions
//! - Collaborators are trait objects; orchestrators never touch an SDK
//! - No state survives a run; every decision comes from live probes and reads
//! - Steps within a run are strictly sequential

pub mod failback;
pub mod failover;
pub mod scheduler;
pub mod types;

pub use failback::{FailbackError, FailbackOrchestrator, FailbackPlan};
pub use failover::{FailoverOrchestrator, FailoverPlan};
pub use scheduler::FailoverScheduler;
pub use types::{Action, ActionRequest, ActionResponse, FailoverEvent, FailoverOutcome, SiteStatus};
