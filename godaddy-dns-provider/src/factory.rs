//! Provider factory functions.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::providers::GodaddyProvider;
use crate::traits::DnsApi;

/// Creates a [`DnsApi`] instance from the given configuration.
///
/// The returned client is wrapped in `Arc<dyn DnsApi>` for easy sharing
/// across async tasks and services.
///
/// # Examples
///
/// ```rust,no_run
/// use godaddy_dns_provider::{create_provider, ClientConfig};
///
/// let config = ClientConfig::from_env().unwrap();
/// let api = create_provider(config).unwrap();
/// ```
pub fn create_provider(config: ClientConfig) -> Result<Arc<dyn DnsApi>> {
    Ok(Arc::new(GodaddyProvider::new(config)?))
}
