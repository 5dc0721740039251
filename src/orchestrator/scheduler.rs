//! Built-in periodic failover checks (`watch` mode).
//!
//! # Responsibilities
//! - Start a failover check every interval
//! - Stop between checks when shutdown is signalled
//!
//! # Design Decisions
//! - Runs never overlap; a slow run delays the next tick instead of bursting
//! - A check in progress is never cancelled

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{self, MissedTickBehavior};

use crate::orchestrator::failover::FailoverOrchestrator;

pub struct FailoverScheduler {
    orchestrator: Arc<FailoverOrchestrator>,
    interval: Duration,
}

impl FailoverScheduler {
    pub fn new(orchestrator: Arc<FailoverOrchestrator>, interval: Duration) -> Self {
        Self {
            orchestrator,
            interval,
        }
    }

    /// Loop until `shutdown` fires. Returns the number of completed checks.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) -> u64 {
        tracing::info!(interval_secs = self.interval.as_secs(), "Failover scheduler starting");

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut completed = 0;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let event = self.orchestrator.run().await;
                    completed += 1;
                    tracing::info!(outcome = event.outcome.as_str(), message = %event.message, "Failover check finished");
                }
                _ = shutdown.recv() => {
                    tracing::info!("Failover scheduler received shutdown signal, exiting loop");
                    break;
                }
            }
        }

        completed
    }
}
