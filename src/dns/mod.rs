//! DNS cutover.
//!
//! # Responsibilities
//! - Upsert the public CNAME record to point at a target host
//! - Normalize configured URLs into bare host names
//!
//! # Design Decisions
//! - Upserts only; applying the same cutover twice yields the same record
//! - TTL is part of every cutover so each direction picks its own

pub mod route53;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

pub use route53::Route53Controller;

/// One DNS upsert intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsCutover {
    pub hosted_zone: String,
    pub record_name: String,
    pub target_host: String,
    pub ttl: u32,
}

/// Errors from the DNS API.
#[derive(Debug, Error)]
pub enum DnsError {
    #[error("invalid record change: {0}")]
    InvalidChange(String),

    #[error("DNS API error: {0}")]
    Api(String),
}

/// Writes CNAME records.
#[async_trait]
pub trait DnsController: Send + Sync {
    async fn upsert_cname(&self, cutover: &DnsCutover) -> Result<(), DnsError>;
}

/// Reduce a configured endpoint or domain to a bare host name.
///
/// `https://dr.example.com/health` becomes `dr.example.com`; a value without a
/// scheme is returned without any trailing slash.
pub fn host_of(value: &str) -> String {
    let trimmed = value.trim();
    if let Ok(url) = Url::parse(trimmed) {
        if let Some(host) = url.host_str() {
            return host.to_string();
        }
    }

    trimmed
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_of() {
        assert_eq!(host_of("https://dr.rndevops.site"), "dr.rndevops.site");
        assert_eq!(host_of("https://dr.rndevops.site/"), "dr.rndevops.site");
        assert_eq!(host_of("http://dr.rndevops.site:8443/health"), "dr.rndevops.site");
        assert_eq!(host_of("rndevops.site"), "rndevops.site");
        assert_eq!(host_of(" primary.rndevops.site/ "), "primary.rndevops.site");
    }
}
