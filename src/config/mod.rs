//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional TOML file (tunables)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ControllerConfig (validated, immutable)
//!
//! environment variables (deployment settings)
//!     → loader.rs (FailoverSettings / FailbackSettings, all required)
//!     → fatal startup error listing every missing name
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded and passed explicitly to each orchestrator
//! - Tunables all have defaults; deployment settings have none
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::ControllerConfig;
pub use schema::{AdminConfig, DnsConfig, FailbackConfig, FailoverConfig, ObservabilityConfig};
pub use schema::{FailbackSettings, FailoverSettings, ProbeConfig, SchedulerConfig};
