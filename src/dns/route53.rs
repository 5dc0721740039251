//! Route 53 adapter.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_route53::error::DisplayErrorContext;
use aws_sdk_route53::types::{Change, ChangeAction, ChangeBatch, ResourceRecord, ResourceRecordSet, RrType};
use aws_sdk_route53::Client;

use crate::dns::{DnsController, DnsCutover, DnsError};

/// [`DnsController`] writing CNAME records to a Route 53 hosted zone.
#[derive(Debug, Clone)]
pub struct Route53Controller {
    client: Client,
}

impl Route53Controller {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }

    fn change_batch(cutover: &DnsCutover) -> Result<ChangeBatch, DnsError> {
        let invalid = |e: aws_sdk_route53::error::BuildError| DnsError::InvalidChange(e.to_string());

        let record = ResourceRecord::builder()
            .value(&cutover.target_host)
            .build()
            .map_err(invalid)?;

        let record_set = ResourceRecordSet::builder()
            .name(&cutover.record_name)
            .r#type(RrType::Cname)
            .ttl(i64::from(cutover.ttl))
            .resource_records(record)
            .build()
            .map_err(invalid)?;

        let change = Change::builder()
            .action(ChangeAction::Upsert)
            .resource_record_set(record_set)
            .build()
            .map_err(invalid)?;

        ChangeBatch::builder().changes(change).build().map_err(invalid)
    }
}

#[async_trait]
impl DnsController for Route53Controller {
    async fn upsert_cname(&self, cutover: &DnsCutover) -> Result<(), DnsError> {
        let batch = Self::change_batch(cutover)?;

        self.client
            .change_resource_record_sets()
            .hosted_zone_id(&cutover.hosted_zone)
            .change_batch(batch)
            .send()
            .await
            .map_err(|e| DnsError::Api(DisplayErrorContext(&e).to_string()))?;

        tracing::info!(
            record = %cutover.record_name,
            target = %cutover.target_host,
            ttl = cutover.ttl,
            "DNS record upserted"
        );
        Ok(())
    }
}
