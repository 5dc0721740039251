//! Probe targets and attempt policies.

use std::time::Duration;

/// An endpoint to probe and its per-attempt timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSpec {
    pub url: String,
    pub timeout: Duration,
}

impl EndpointSpec {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    /// One attempt, no retry.
    pub fn single_attempt(&self) -> PollPolicy {
        PollPolicy::single(self.timeout)
    }

    /// Up to `max_attempts` attempts spaced `retry_period` apart.
    pub fn with_retries(&self, retry_period: Duration, max_attempts: u32) -> PollPolicy {
        PollPolicy::bounded(self.timeout, retry_period, max_attempts)
    }
}

/// Governs one attempt loop of [`EndpointProbe::poll`](super::EndpointProbe::poll).
///
/// Without a `retry_period` at most one attempt is made, whatever
/// `max_retries` says. `max_retries` counts attempts, so `Some(0)` and
/// `Some(1)` both mean a single attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub timeout: Duration,
    pub retry_period: Option<Duration>,
    pub max_retries: Option<u32>,
}

impl PollPolicy {
    pub fn single(timeout: Duration) -> Self {
        Self {
            timeout,
            retry_period: None,
            max_retries: None,
        }
    }

    pub fn bounded(timeout: Duration, retry_period: Duration, max_retries: u32) -> Self {
        Self {
            timeout,
            retry_period: Some(retry_period),
            max_retries: Some(max_retries),
        }
    }

    /// Upper bound on the number of attempts this policy allows.
    /// `None` means unbounded (a period without a ceiling).
    pub fn attempt_ceiling(&self) -> Option<u32> {
        match (self.retry_period, self.max_retries) {
            (None, _) => Some(1),
            (Some(_), Some(max)) => Some(max.max(1)),
            (Some(_), None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_ceiling() {
        let timeout = Duration::from_secs(10);
        assert_eq!(PollPolicy::single(timeout).attempt_ceiling(), Some(1));
        assert_eq!(
            PollPolicy::bounded(timeout, Duration::from_secs(30), 20).attempt_ceiling(),
            Some(20)
        );

        let no_period = PollPolicy {
            timeout,
            retry_period: None,
            max_retries: Some(5),
        };
        assert_eq!(no_period.attempt_ceiling(), Some(1));

        let unbounded = PollPolicy {
            timeout,
            retry_period: Some(Duration::from_secs(1)),
            max_retries: None,
        };
        assert_eq!(unbounded.attempt_ceiling(), None);
    }

    #[test]
    fn test_endpoint_builds_policies() {
        let endpoint = EndpointSpec::new("https://dr.example.com", Duration::from_secs(10));
        assert_eq!(endpoint.single_attempt().retry_period, None);

        let policy = endpoint.with_retries(Duration::from_secs(30), 20);
        assert_eq!(policy.timeout, Duration::from_secs(10));
        assert_eq!(policy.max_retries, Some(20));
    }
}
