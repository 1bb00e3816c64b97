//! Client configuration
//!
//! Values can be given explicitly or read from the environment:
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `GODADDY_API_KEY` | API key (required) |
//! | `GODADDY_API_SECRET` | API secret (required) |
//! | `GODADDY_ENVIRONMENT` | `production` (default) or `test` |

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::{CredentialValidationError, Credentials};

pub const ENV_API_KEY: &str = "GODADDY_API_KEY";
pub const ENV_API_SECRET: &str = "GODADDY_API_SECRET";
pub const ENV_ENVIRONMENT: &str = "GODADDY_ENVIRONMENT";

pub(crate) const PRODUCTION_URL: &str = "https://api.godaddy.com";
pub(crate) const TEST_URL: &str = "https://api.ote-godaddy.com";

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// 429 最大重试次数
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Which registrar deployment to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    /// The registrar's OTE sandbox.
    Test,
}

impl Environment {
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_URL,
            Self::Test => TEST_URL,
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = CredentialValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "production" | "prod" => Ok(Self::Production),
            "test" | "ote" => Ok(Self::Test),
            other => Err(CredentialValidationError::InvalidFormat {
                field: "environment".to_string(),
                label: "Environment".to_string(),
                reason: format!("expected 'production' or 'test', got '{other}'"),
            }),
        }
    }
}

/// Rate-limit retry policy.
///
/// Delays are multiples of `unit`: an API-supplied `retryAfterSec` of `n` waits `n * unit`,
/// and the fallback backoff waits `2^attempt * unit`. The registrar speaks in seconds, so
/// `unit` is one second outside of tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first request. The request is sent at most `max_retries + 1` times.
    pub max_retries: u32,
    pub unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            unit: Duration::from_secs(1),
        }
    }
}

/// Everything needed to construct a [`GodaddyProvider`](crate::GodaddyProvider).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub credentials: Credentials,
    pub environment: Environment,
    /// Replaces the environment's base URL (mock servers, proxies).
    pub base_url: Option<String>,
    pub retry: RetryPolicy,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            environment: Environment::default(),
            base_url: None,
            retry: RetryPolicy::default(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Read credentials and environment from `GODADDY_*` variables.
    pub fn from_env() -> Result<Self, CredentialValidationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CredentialValidationError> {
        let credentials = Credentials::new(lookup(ENV_API_KEY), lookup(ENV_API_SECRET))?;
        let environment = match lookup(ENV_ENVIRONMENT) {
            Some(value) => value.parse()?,
            None => Environment::default(),
        };
        Ok(Self::new(credentials).with_environment(environment))
    }

    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn with_timeouts(mut self, connect: Duration, request: Duration) -> Self {
        self.connect_timeout = connect;
        self.request_timeout = request;
        self
    }

    /// Base URL requests are sent to, without a trailing slash.
    pub fn resolved_base_url(&self) -> String {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
            .trim_end_matches('/')
            .to_string()
    }
}
