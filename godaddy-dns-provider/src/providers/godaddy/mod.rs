//! GoDaddy registrar provider

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;
use tokio_util::sync::CancellationToken;

use crate::config::{ClientConfig, RetryPolicy};
use crate::error::Result;
use crate::providers::common::create_http_client;
use crate::utils::log_sanitizer::mask_secret;

pub(crate) use types::ApiErrorBody;

pub(crate) const PROVIDER_NAME: &str = "godaddy";

/// GoDaddy registrar API client
///
/// Cloning is cheap: the HTTP connection pool is shared between clones.
#[derive(Clone)]
pub struct GodaddyProvider {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) auth_header: String,
    pub(crate) api_key: String,
    pub(crate) retry: RetryPolicy,
    pub(crate) cancel: CancellationToken,
}

impl GodaddyProvider {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = create_http_client(
            PROVIDER_NAME,
            config.connect_timeout,
            config.request_timeout,
        )?;
        let base_url = config.resolved_base_url();
        log::debug!("[{PROVIDER_NAME}] Using API base URL {base_url}");

        Ok(Self {
            client,
            base_url,
            auth_header: config.credentials.authorization_header(),
            api_key: config.credentials.api_key,
            retry: config.retry,
            cancel: CancellationToken::new(),
        })
    }

    /// A handle whose requests and rate-limit waits are aborted once `token` is cancelled.
    ///
    /// Aborted calls fail with [`ProviderError::Cancelled`](crate::ProviderError::Cancelled).
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            cancel: token,
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl std::fmt::Debug for GodaddyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GodaddyProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &mask_secret(&self.api_key))
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}
