//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Orchestrators, probes and adapters produce:
//!     → logging.rs (structured log events, one span per run)
//!     → metrics.rs (counters)
//!
//! Consumers:
//!     → Log aggregation (stdout, plain or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Every orchestration run carries a `run_id` field
//! - Metrics are recorded through the `metrics` facade; without an installed
//!   exporter they are no-ops

pub mod logging;
pub mod metrics;
