//! 测试辅助模块
//!
//! 提供内存版 registrar mock 和便捷的测试工厂方法。

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use godaddy_dns_provider::{
    DnsApi, DnsRecord, DomainContactSet, DomainContacts, DomainDetail, DomainSummary,
    DomainUpdate, ProviderError, RecordType, Result,
};
use tokio::sync::RwLock;

use crate::services::{DomainService, RecordService, ServiceContext};
use crate::types::DuplicatePolicy;

pub const TEST_DOMAIN: &str = "example.com";

type GroupKey = (String, RecordType, String);

/// 调用计数
#[derive(Default)]
pub struct CallCounts {
    pub group_reads: AtomicUsize,
    pub group_replaces: AtomicUsize,
    pub record_adds: AtomicUsize,
    pub group_deletes: AtomicUsize,
    pub domain_reads: AtomicUsize,
    pub domain_updates: AtomicUsize,
    pub contact_updates: AtomicUsize,
}

impl CallCounts {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    /// 所有写操作次数之和
    pub fn writes(&self) -> usize {
        [
            &self.group_replaces,
            &self.record_adds,
            &self.group_deletes,
            &self.domain_updates,
            &self.contact_updates,
        ]
        .iter()
        .map(|c| Self::get(c))
        .sum()
    }
}

// ===== MockDnsApi =====

/// 内存版 registrar：按 (domain, type, name) 保存记录组
pub struct MockDnsApi {
    domains: RwLock<HashMap<String, DomainDetail>>,
    groups: RwLock<HashMap<GroupKey, Vec<DnsRecord>>>,
    /// 如果 Some，所有写操作返回该 HTTP 状态对应的错误
    write_failure: RwLock<Option<u16>>,
    /// 如果 Some，所有读操作返回该 HTTP 状态对应的错误
    read_failure: RwLock<Option<u16>>,
    pub calls: CallCounts,
}

impl MockDnsApi {
    pub fn new() -> Self {
        Self {
            domains: RwLock::new(HashMap::new()),
            groups: RwLock::new(HashMap::new()),
            write_failure: RwLock::new(None),
            read_failure: RwLock::new(None),
            calls: CallCounts::default(),
        }
    }

    pub async fn seed_domain(&self, detail: DomainDetail) {
        self.domains
            .write()
            .await
            .insert(detail.summary.domain.clone(), detail);
    }

    /// 直接写入记录组（绕过计数）
    pub async fn seed_group(&self, domain: &str, records: Vec<DnsRecord>) {
        let Some(first) = records.first() else {
            return;
        };
        let key = (domain.to_string(), first.record_type, first.name.clone());
        self.groups.write().await.insert(key, records);
    }

    pub async fn group(&self, domain: &str, record_type: RecordType, name: &str) -> Vec<DnsRecord> {
        self.groups
            .read()
            .await
            .get(&(domain.to_string(), record_type, name.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    pub async fn domain(&self, domain: &str) -> Option<DomainDetail> {
        self.domains.read().await.get(domain).cloned()
    }

    pub async fn set_write_failure(&self, status: Option<u16>) {
        *self.write_failure.write().await = status;
    }

    pub async fn set_read_failure(&self, status: Option<u16>) {
        *self.read_failure.write().await = status;
    }

    async fn check(&self, failure: &RwLock<Option<u16>>, resource: &str) -> Result<()> {
        match *failure.read().await {
            Some(status) => Err(status_error(status, resource)),
            None => Ok(()),
        }
    }

    async fn check_read(&self, resource: &str) -> Result<()> {
        self.check(&self.read_failure, resource).await
    }

    async fn check_write(&self, resource: &str) -> Result<()> {
        self.check(&self.write_failure, resource).await
    }

    async fn require_domain(&self, domain: &str) -> Result<()> {
        if self.domains.read().await.contains_key(domain) {
            Ok(())
        } else {
            Err(status_error(404, &format!("Domain {domain}")))
        }
    }
}

fn status_error(status: u16, resource: &str) -> ProviderError {
    match status {
        404 => ProviderError::NotFound {
            provider: "mock".to_string(),
            resource: resource.to_string(),
            raw_message: None,
        },
        _ => ProviderError::Api {
            provider: "mock".to_string(),
            status,
            raw_code: None,
            raw_message: format!("mock failure {status}"),
        },
    }
}

fn group_key(domain: &str, record_type: RecordType, name: &str) -> GroupKey {
    (domain.to_string(), record_type, name.to_string())
}

fn sorted(mut records: Vec<DnsRecord>) -> Vec<DnsRecord> {
    records.sort_by(|a, b| {
        (a.record_type.as_str(), &a.name, &a.data).cmp(&(b.record_type.as_str(), &b.name, &b.data))
    });
    records
}

#[async_trait]
impl DnsApi for MockDnsApi {
    async fn validate_credentials(&self) -> Result<bool> {
        Ok(true)
    }

    async fn list_domains(&self) -> Result<Vec<DomainSummary>> {
        self.check_read("Domains").await?;
        Ok(self
            .domains
            .read()
            .await
            .values()
            .map(|d| d.summary.clone())
            .collect())
    }

    async fn get_domain(&self, domain: &str) -> Result<DomainDetail> {
        self.calls.domain_reads.fetch_add(1, Ordering::SeqCst);
        self.check_read(domain).await?;
        self.domains
            .read()
            .await
            .get(domain)
            .cloned()
            .ok_or_else(|| status_error(404, &format!("Domain {domain}")))
    }

    async fn update_domain(&self, domain: &str, update: &DomainUpdate) -> Result<()> {
        self.calls.domain_updates.fetch_add(1, Ordering::SeqCst);
        self.check_write(domain).await?;
        let mut domains = self.domains.write().await;
        let detail = domains
            .get_mut(domain)
            .ok_or_else(|| status_error(404, &format!("Domain {domain}")))?;
        if let Some(locked) = update.locked {
            detail.summary.locked = locked;
        }
        if let Some(renew_auto) = update.renew_auto {
            detail.summary.renew_auto = renew_auto;
        }
        if let Some(name_servers) = &update.name_servers {
            detail.name_servers.clone_from(name_servers);
        }
        Ok(())
    }

    async fn get_contacts(&self, domain: &str) -> Result<DomainContactSet> {
        self.check_read(domain).await?;
        let domains = self.domains.read().await;
        let detail = domains
            .get(domain)
            .ok_or_else(|| status_error(404, &format!("Domain {domain}")))?;
        Ok(DomainContactSet {
            contact_admin: detail.contact_admin.clone(),
            contact_billing: detail.contact_billing.clone(),
            contact_registrant: detail.contact_registrant.clone(),
            contact_tech: detail.contact_tech.clone(),
        })
    }

    async fn update_contacts(&self, domain: &str, contacts: &DomainContacts) -> Result<()> {
        self.calls.contact_updates.fetch_add(1, Ordering::SeqCst);
        self.check_write(domain).await?;
        let mut domains = self.domains.write().await;
        let detail = domains
            .get_mut(domain)
            .ok_or_else(|| status_error(404, &format!("Domain {domain}")))?;
        for (desired, current) in [
            (&contacts.contact_admin, &mut detail.contact_admin),
            (&contacts.contact_billing, &mut detail.contact_billing),
            (&contacts.contact_registrant, &mut detail.contact_registrant),
            (&contacts.contact_tech, &mut detail.contact_tech),
        ] {
            if let Some(contact) = desired {
                current.clone_from(contact);
            }
        }
        Ok(())
    }

    async fn list_records(&self, domain: &str) -> Result<Vec<DnsRecord>> {
        self.check_read(domain).await?;
        self.require_domain(domain).await?;
        let groups = self.groups.read().await;
        Ok(sorted(
            groups
                .iter()
                .filter(|((d, _, _), _)| d == domain)
                .flat_map(|(_, records)| records.iter().cloned())
                .collect(),
        ))
    }

    async fn list_records_by_type(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>> {
        self.check_read(domain).await?;
        self.require_domain(domain).await?;
        let groups = self.groups.read().await;
        Ok(sorted(
            groups
                .iter()
                .filter(|((d, t, _), _)| d == domain && *t == record_type)
                .flat_map(|(_, records)| records.iter().cloned())
                .collect(),
        ))
    }

    async fn get_record_group(
        &self,
        domain: &str,
        record_type: RecordType,
        name: &str,
    ) -> Result<Vec<DnsRecord>> {
        self.calls.group_reads.fetch_add(1, Ordering::SeqCst);
        self.check_read(domain).await?;
        self.require_domain(domain).await?;
        Ok(self.group(domain, record_type, name).await)
    }

    async fn replace_record_group(
        &self,
        domain: &str,
        record_type: RecordType,
        name: &str,
        records: &[DnsRecord],
    ) -> Result<()> {
        self.calls.group_replaces.fetch_add(1, Ordering::SeqCst);
        self.check_write(domain).await?;
        self.require_domain(domain).await?;
        let key = group_key(domain, record_type, name);
        let mut groups = self.groups.write().await;
        if records.is_empty() {
            groups.remove(&key);
        } else {
            groups.insert(key, records.to_vec());
        }
        Ok(())
    }

    async fn add_record(&self, domain: &str, record: &DnsRecord) -> Result<()> {
        self.calls.record_adds.fetch_add(1, Ordering::SeqCst);
        self.check_write(domain).await?;
        self.require_domain(domain).await?;
        self.groups
            .write()
            .await
            .entry(group_key(domain, record.record_type, &record.name))
            .or_default()
            .push(record.clone());
        Ok(())
    }

    async fn delete_record_group(
        &self,
        domain: &str,
        record_type: RecordType,
        name: &str,
    ) -> Result<()> {
        self.calls.group_deletes.fetch_add(1, Ordering::SeqCst);
        self.check_write(domain).await?;
        self.require_domain(domain).await?;
        match self
            .groups
            .write()
            .await
            .remove(&group_key(domain, record_type, name))
        {
            Some(_) => Ok(()),
            None => Err(status_error(
                404,
                &format!("Record group {domain} {record_type}/{name}"),
            )),
        }
    }
}

// ===== Factory helpers =====

/// 构造一个最小的域名详情
pub fn test_domain(domain: &str) -> DomainDetail {
    let json = serde_json::json!({
        "domain": domain,
        "status": "ACTIVE",
        "locked": true,
        "renewAuto": true,
        "nameServers": ["ns1.example.net", "ns2.example.net"],
        "contactAdmin": { "email": "admin@example.com" },
        "contactTech": { "email": "tech@example.com" },
    });
    serde_json::from_value(json).unwrap()
}

pub fn a_record(name: &str, data: &str) -> DnsRecord {
    DnsRecord::new(RecordType::A, name, data, 600)
}

/// 创建已注册 [`TEST_DOMAIN`] 的测试上下文
pub async fn create_test_context(policy: DuplicatePolicy) -> (Arc<ServiceContext>, Arc<MockDnsApi>) {
    let api = Arc::new(MockDnsApi::new());
    api.seed_domain(test_domain(TEST_DOMAIN)).await;
    let ctx = Arc::new(ServiceContext::new(api.clone()).with_duplicate_policy(policy));
    (ctx, api)
}

pub async fn create_test_record_service(policy: DuplicatePolicy) -> (RecordService, Arc<MockDnsApi>) {
    let (ctx, api) = create_test_context(policy).await;
    (RecordService::new(ctx), api)
}

pub async fn create_test_domain_service() -> (DomainService, Arc<MockDnsApi>) {
    let (ctx, api) = create_test_context(DuplicatePolicy::default()).await;
    (DomainService::new(ctx), api)
}
