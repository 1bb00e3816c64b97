//! GoDaddy DNS Core Library
//!
//! Per-record management on top of the registrar's record-group API:
//! - Record Service: create/read/update/delete single records, import by id
//! - Domain Service: domain settings and contacts, sending only what changed
//!
//! The registrar is reached through the [`godaddy_dns_provider::DnsApi`] trait, injected via
//! [`ServiceContext`], so the services run unchanged against a mock in tests.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use godaddy_dns_core::{RecordService, ServiceContext};
//! use godaddy_dns_core::types::{DnsRecord, DuplicatePolicy, RecordType};
//! use godaddy_dns_provider::{ClientConfig, create_provider};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let api = create_provider(ClientConfig::from_env()?)?;
//! let ctx = Arc::new(ServiceContext::new(api).with_duplicate_policy(DuplicatePolicy::Skip));
//! let records = RecordService::new(ctx);
//!
//! let key = records
//!     .create_record("example.com", &DnsRecord::new(RecordType::A, "www", "192.0.2.10", 600))
//!     .await?;
//! records.delete_record(&key).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod services;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult, OperationContext};
pub use services::{DomainService, RecordService, ServiceContext};
