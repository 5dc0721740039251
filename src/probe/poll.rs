//! Bounded health-check polling.

use std::sync::Arc;

use tokio::time;

use crate::observability::metrics;
use crate::probe::{EndpointSpec, HttpProber, PollPolicy};

/// Polls an endpoint until it answers 200 or the policy is exhausted.
#[derive(Clone)]
pub struct EndpointProbe {
    prober: Arc<dyn HttpProber>,
}

impl EndpointProbe {
    pub fn new(prober: Arc<dyn HttpProber>) -> Self {
        Self { prober }
    }

    /// Returns `true` on the first 200, `false` once the policy runs out.
    ///
    /// A policy with `max_retries` but no `retry_period` makes exactly one
    /// attempt; it never spins.
    pub async fn poll(&self, endpoint: &EndpointSpec, policy: &PollPolicy) -> bool {
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;

            match self.prober.get(&endpoint.url, policy.timeout).await {
                Ok(200) => {
                    metrics::record_probe_attempt(true);
                    tracing::debug!(url = %endpoint.url, attempts, "Health check succeeded");
                    return true;
                }
                Ok(status) => {
                    metrics::record_probe_attempt(false);
                    tracing::warn!(url = %endpoint.url, status, attempts, "Health check failed: non-200 status");
                }
                Err(e) => {
                    metrics::record_probe_attempt(false);
                    tracing::warn!(url = %endpoint.url, error = %e, attempts, "Health check failed");
                }
            }

            if let Some(max) = policy.max_retries {
                if attempts >= max {
                    tracing::info!(url = %endpoint.url, attempts, "Max retries reached, giving up");
                    return false;
                }
            }

            match policy.retry_period {
                Some(period) => time::sleep(period).await,
                None => return false,
            }
        }
    }
}
