//! Disaster-recovery failover controller.

pub mod admin;
pub mod capacity;
pub mod config;
pub mod dns;
pub mod lifecycle;
pub mod notify;
pub mod observability;
pub mod orchestrator;
pub mod probe;

pub use config::schema::ControllerConfig;
pub use lifecycle::Shutdown;
pub use orchestrator::{FailbackOrchestrator, FailoverOrchestrator};
