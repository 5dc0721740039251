//! HTTP transport for health checks.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::time;

use crate::probe::{HttpProber, ProbeError, USER_AGENT};

/// [`HttpProber`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestProber {
    client: Client,
}

impl ReqwestProber {
    pub fn new() -> Result<Self, ProbeError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ProbeError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpProber for ReqwestProber {
    async fn get(&self, url: &str, timeout: Duration) -> Result<u16, ProbeError> {
        let response_future = self.client.get(url).timeout(timeout).send();

        match time::timeout(timeout, response_future).await {
            Ok(Ok(response)) => Ok(response.status().as_u16()),
            Ok(Err(e)) if e.is_timeout() => Err(ProbeError::Timeout(timeout)),
            Ok(Err(e)) => Err(ProbeError::Transport(e.to_string())),
            Err(_) => Err(ProbeError::Timeout(timeout)),
        }
    }
}
