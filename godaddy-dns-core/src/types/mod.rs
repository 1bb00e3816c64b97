//! 类型定义模块

pub(crate) mod domain;
mod record;

pub use domain::DomainSettings;
pub use record::{DuplicatePolicy, ImportId, ImportedRecord, RecordKey};

// Re-export provider 库的公共类型
pub use godaddy_dns_provider::{
    Contact, DnsRecord, DomainContactSet, DomainContacts, DomainDetail, DomainUpdate, RecordType,
};
