//! GoDaddy DnsApi trait 实现

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::providers::common::normalize_domain_name;
use crate::traits::{DnsApi, ErrorContext};
use crate::types::{
    DnsRecord, DomainAvailability, DomainContactSet, DomainContacts, DomainDetail, DomainPurchase,
    DomainSummary, DomainUpdate, RecordType,
};

use super::{GodaddyProvider, PROVIDER_NAME};

fn domain_path(domain: &str) -> String {
    format!("/v1/domains/{}", normalize_domain_name(domain))
}

fn records_path(domain: &str) -> String {
    format!("{}/records", domain_path(domain))
}

fn type_path(domain: &str, record_type: RecordType) -> String {
    format!("{}/{record_type}", records_path(domain))
}

fn group_path(domain: &str, record_type: RecordType, name: &str) -> String {
    format!("{}/{name}", type_path(domain, record_type))
}

impl GodaddyProvider {
    /// Check whether `domain` can be registered.
    pub async fn check_availability(&self, domain: &str) -> Result<DomainAvailability> {
        let path = format!(
            "/v1/domains/available?domain={}",
            urlencoding::encode(&normalize_domain_name(domain))
        );
        self.get(&path, &ErrorContext::domain(domain)).await
    }

    /// Register a domain. This call is not reconciled.
    pub async fn purchase_domain(&self, purchase: &DomainPurchase) -> Result<()> {
        log::info!("[{PROVIDER_NAME}] Purchasing domain {}", purchase.domain);
        self.post(
            "/v1/domains/purchase",
            purchase,
            &ErrorContext::domain(&purchase.domain),
        )
        .await
    }

    /// Replace every record of the domain.
    pub async fn replace_all_records(&self, domain: &str, records: &[DnsRecord]) -> Result<()> {
        self.put(
            &records_path(domain),
            records,
            &ErrorContext::records(domain, None, None),
        )
        .await
    }

    /// Replace every record of one type.
    pub async fn replace_records_by_type(
        &self,
        domain: &str,
        record_type: RecordType,
        records: &[DnsRecord],
    ) -> Result<()> {
        self.put(
            &type_path(domain, record_type),
            records,
            &ErrorContext::records(domain, Some(record_type), None),
        )
        .await
    }
}

#[async_trait]
impl DnsApi for GodaddyProvider {
    async fn validate_credentials(&self) -> Result<bool> {
        match self
            .get::<Vec<DomainSummary>>("/v1/domains?limit=1", &ErrorContext::default())
            .await
        {
            Ok(_) => Ok(true),
            Err(ProviderError::InvalidCredentials { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn list_domains(&self) -> Result<Vec<DomainSummary>> {
        self.get("/v1/domains", &ErrorContext::default()).await
    }

    async fn get_domain(&self, domain: &str) -> Result<DomainDetail> {
        self.get(&domain_path(domain), &ErrorContext::domain(domain))
            .await
    }

    async fn update_domain(&self, domain: &str, update: &DomainUpdate) -> Result<()> {
        self.patch(&domain_path(domain), update, &ErrorContext::domain(domain))
            .await
    }

    async fn get_contacts(&self, domain: &str) -> Result<DomainContactSet> {
        self.get(
            &format!("{}/contacts", domain_path(domain)),
            &ErrorContext::domain(domain),
        )
        .await
    }

    async fn update_contacts(&self, domain: &str, contacts: &DomainContacts) -> Result<()> {
        self.patch(
            &format!("{}/contacts", domain_path(domain)),
            contacts,
            &ErrorContext::domain(domain),
        )
        .await
    }

    async fn list_records(&self, domain: &str) -> Result<Vec<DnsRecord>> {
        self.get(
            &records_path(domain),
            &ErrorContext::records(domain, None, None),
        )
        .await
    }

    async fn list_records_by_type(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>> {
        self.get(
            &type_path(domain, record_type),
            &ErrorContext::records(domain, Some(record_type), None),
        )
        .await
    }

    async fn get_record_group(
        &self,
        domain: &str,
        record_type: RecordType,
        name: &str,
    ) -> Result<Vec<DnsRecord>> {
        self.get(
            &group_path(domain, record_type, name),
            &ErrorContext::records(domain, Some(record_type), Some(name)),
        )
        .await
    }

    async fn replace_record_group(
        &self,
        domain: &str,
        record_type: RecordType,
        name: &str,
        records: &[DnsRecord],
    ) -> Result<()> {
        if records.is_empty() {
            log::warn!(
                "[{PROVIDER_NAME}] Empty replace for {domain} {record_type}/{name}, deleting the group instead"
            );
            return self.delete_record_group(domain, record_type, name).await;
        }
        self.put(
            &group_path(domain, record_type, name),
            records,
            &ErrorContext::records(domain, Some(record_type), Some(name)),
        )
        .await
    }

    async fn add_record(&self, domain: &str, record: &DnsRecord) -> Result<()> {
        self.patch(
            &records_path(domain),
            std::slice::from_ref(record),
            &ErrorContext::records(domain, Some(record.record_type), Some(&record.name)),
        )
        .await
    }

    async fn delete_record_group(
        &self,
        domain: &str,
        record_type: RecordType,
        name: &str,
    ) -> Result<()> {
        self.delete(
            &group_path(domain, record_type, name),
            &ErrorContext::records(domain, Some(record_type), Some(name)),
        )
        .await
    }
}
