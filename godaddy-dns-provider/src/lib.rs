//! # godaddy-dns-provider
//!
//! Client library for the GoDaddy registrar API: DNS record groups, domain
//! settings and contacts, with a rate-limit aware transport.
//!
//! The registrar addresses DNS state as **record groups**: every record that
//! shares a type and host name is read and replaced together. This crate
//! exposes that model directly through the [`DnsApi`] trait; per-record
//! create/update/delete semantics live in `godaddy-dns-core`.
//!
//! ## Feature Flags
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for cross-compilation and static builds.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use godaddy_dns_provider::{create_provider, ClientConfig, DnsRecord, RecordType};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Read GODADDY_API_KEY / GODADDY_API_SECRET / GODADDY_ENVIRONMENT
//!     let api = create_provider(ClientConfig::from_env()?)?;
//!
//!     // 2. Validate credentials against the remote API
//!     if !api.validate_credentials().await? {
//!         return Err("credentials rejected".into());
//!     }
//!
//!     // 3. Read one record group
//!     let group = api
//!         .get_record_group("example.com", RecordType::A, "www")
//!         .await?;
//!     for record in &group {
//!         println!("{} {} -> {} (ttl {})", record.name, record.record_type, record.data, record.ttl);
//!     }
//!
//!     // 4. Append a record to its group
//!     let record = DnsRecord::new(RecordType::A, "www", "192.0.2.10", 600);
//!     api.add_record("example.com", &record).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All API operations return [`Result<T, ProviderError>`](ProviderError):
//!
//! - [`ProviderError::InvalidCredentials`]: authentication failed (HTTP 401)
//! - [`ProviderError::NotFound`]: domain or record group absent (HTTP 404)
//! - [`ProviderError::RateLimitExhausted`]: HTTP 429 on every attempt
//! - [`ProviderError::Api`]: any other non-success status, with the raw body
//! - [`ProviderError::Cancelled`]: the caller's cancellation token fired
//!
//! HTTP 429 responses are retried up to three times, honouring the API's
//! `retryAfterSec` hint and falling back to exponential backoff.

mod config;
mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;
mod validation;

// Re-export configuration
pub use config::{
    ClientConfig, ENV_API_KEY, ENV_API_SECRET, ENV_ENVIRONMENT, Environment, RetryPolicy,
};

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export factory functions
pub use factory::create_provider;

// Re-export core trait only (internal traits are not exported)
pub use traits::DnsApi;

// Re-export types
pub use types::{
    Address, Contact, CredentialValidationError, Credentials, DnsRecord, Dnssec, DnssecKey,
    DomainAvailability, DomainConsent, DomainContactSet, DomainContacts, DomainDetail,
    DomainPurchase, DomainSummary, DomainUpdate, RecordType,
};

// Re-export validation
pub use validation::{
    MAX_TTL, MAX_U16_FIELD, MIN_TTL, RecordField, ValidationError, required_fields,
    validate_record, validate_record_data,
};

// Re-export concrete provider and the cancellation token it accepts
pub use providers::GodaddyProvider;
pub use tokio_util::sync::CancellationToken;
