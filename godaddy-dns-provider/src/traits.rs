use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{
    DnsRecord, DomainContactSet, DomainContacts, DomainDetail, DomainSummary, DomainUpdate,
    RecordType,
};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// HTTP 状态码
    pub status: u16,
    /// 错误体中的 `code` 字段（可解析时）
    pub code: Option<String>,
    /// 原始响应体
    pub message: String,
}

impl RawApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
/// 用于在映射错误时描述被访问的资源
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    pub domain: Option<String>,
    pub record_type: Option<RecordType>,
    pub record_name: Option<String>,
}

impl ErrorContext {
    pub fn domain(domain: &str) -> Self {
        Self {
            domain: Some(domain.to_string()),
            ..Self::default()
        }
    }

    pub fn records(domain: &str, record_type: Option<RecordType>, name: Option<&str>) -> Self {
        Self {
            domain: Some(domain.to_string()),
            record_type,
            record_name: name.map(str::to_string),
        }
    }

    /// Human readable description used by `NotFound` errors.
    pub fn resource(&self) -> String {
        match (&self.domain, self.record_type, &self.record_name) {
            (Some(domain), Some(t), Some(name)) => format!("Record group {domain} {t}/{name}"),
            (Some(domain), Some(t), None) => format!("{t} records of {domain}"),
            (Some(domain), None, _) => format!("Domain {domain}"),
            (None, ..) => "Resource".to_string(),
        }
    }
}

/// Provider 错误映射 Trait（内部使用）
/// 将原始 HTTP 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: &ErrorContext) -> ProviderError;

    /// 快捷方法：序列化错误
    fn serialization_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::SerializationError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未归类的 HTTP 错误（fallback）
    fn api_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Api {
            provider: self.provider_name().to_string(),
            status: raw.status,
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// Registrar DNS API
///
/// Record operations address whole groups: every record of one `(type, name)`
/// pair is read and replaced together. Implemented by
/// [`GodaddyProvider`](crate::GodaddyProvider); tests substitute in-memory doubles.
#[async_trait]
pub trait DnsApi: Send + Sync {
    /// 验证凭证是否有效
    ///
    /// Rejected credentials yield `Ok(false)`; other failures are errors.
    async fn validate_credentials(&self) -> Result<bool>;

    /// 获取账户下的域名列表
    async fn list_domains(&self) -> Result<Vec<DomainSummary>>;

    /// 获取域名详情
    async fn get_domain(&self, domain: &str) -> Result<DomainDetail>;

    /// Apply the present fields of `update` to the domain.
    async fn update_domain(&self, domain: &str, update: &DomainUpdate) -> Result<()>;

    async fn get_contacts(&self, domain: &str) -> Result<DomainContactSet>;

    /// Replace the contacts that are present in `contacts`.
    async fn update_contacts(&self, domain: &str, contacts: &DomainContacts) -> Result<()>;

    /// Every record of the domain.
    async fn list_records(&self, domain: &str) -> Result<Vec<DnsRecord>>;

    /// Every record of one type.
    async fn list_records_by_type(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<Vec<DnsRecord>>;

    /// The group for `(record_type, name)`. An empty vector means the group is absent.
    async fn get_record_group(
        &self,
        domain: &str,
        record_type: RecordType,
        name: &str,
    ) -> Result<Vec<DnsRecord>>;

    /// Replace the group with `records`.
    ///
    /// Callers express an empty group through [`delete_record_group`](Self::delete_record_group).
    async fn replace_record_group(
        &self,
        domain: &str,
        record_type: RecordType,
        name: &str,
        records: &[DnsRecord],
    ) -> Result<()>;

    /// Append one record to its group without reading the group first.
    async fn add_record(&self, domain: &str, record: &DnsRecord) -> Result<()>;

    /// Remove every record of `(record_type, name)`.
    async fn delete_record_group(
        &self,
        domain: &str,
        record_type: RecordType,
        name: &str,
    ) -> Result<()>;
}
