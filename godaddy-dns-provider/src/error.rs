use serde::{Deserialize, Serialize};

/// Unified error type for registrar API operations.
///
/// Each variant includes a `provider` field identifying the API that produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// # Retries
///
/// Only HTTP 429 responses are retried by the transport. Once the retry ceiling is reached
/// the caller receives [`RateLimitExhausted`](Self::RateLimitExhausted); every other failure
/// is surfaced on the first attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The API key/secret pair was rejected (HTTP 401).
    InvalidCredentials {
        /// Provider that produced the error.
        provider: String,
        /// Raw response body, if any.
        raw_message: Option<String>,
    },

    /// The authenticated account lacks permission for the requested operation (HTTP 403).
    PermissionDenied {
        /// Provider that produced the error.
        provider: String,
        /// Raw response body, if any.
        raw_message: Option<String>,
    },

    /// The addressed domain or record group does not exist (HTTP 404).
    NotFound {
        /// Provider that produced the error.
        provider: String,
        /// Human readable description of what was addressed.
        resource: String,
        /// Raw response body, if any.
        raw_message: Option<String>,
    },

    /// The API kept answering HTTP 429 until the retry ceiling was reached.
    RateLimitExhausted {
        /// Provider that produced the error.
        provider: String,
        /// Number of requests sent, including the first one.
        attempts: u32,
        /// Raw body of the last 429 response.
        raw_message: Option<String>,
    },

    /// Any other non-success HTTP status.
    Api {
        /// Provider that produced the error.
        provider: String,
        /// HTTP status code.
        status: u16,
        /// `code` field of the error body, when the body could be decoded.
        raw_code: Option<String>,
        /// Raw response body.
        raw_message: String,
    },

    /// The caller cancelled the operation while a request or backoff wait was in flight.
    Cancelled {
        /// Provider that produced the error.
        provider: String,
    },

    /// Failed to parse the API response.
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the serialization failure.
        detail: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（凭证错误、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::NotFound { .. }
                | Self::Cancelled { .. }
        )
    }

    /// Whether the remote API reported the addressed resource as absent.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether the operation was aborted by the caller.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// HTTP status attached to this error, if it came from an HTTP response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::InvalidCredentials { .. } => Some(401),
            Self::PermissionDenied { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::RateLimitExhausted { .. } => Some(429),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::InvalidCredentials {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{provider}] Invalid credentials")
                }
            }
            Self::PermissionDenied {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Permission denied: {msg}")
                } else {
                    write!(f, "[{provider}] Permission denied")
                }
            }
            Self::NotFound {
                provider,
                resource,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] {resource} not found: {msg}")
                } else {
                    write!(f, "[{provider}] {resource} not found")
                }
            }
            Self::RateLimitExhausted {
                provider,
                attempts,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(
                        f,
                        "[{provider}] Rate limited after {attempts} attempts: {msg}"
                    )
                } else {
                    write!(f, "[{provider}] Rate limited after {attempts} attempts")
                }
            }
            Self::Api {
                provider,
                status,
                raw_message,
                ..
            } => {
                write!(
                    f,
                    "[{provider}] API error: status {status}, body: {raw_message}"
                )
            }
            Self::Cancelled { provider } => {
                write!(f, "[{provider}] Operation cancelled")
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::SerializationError { provider, detail } => {
                write!(f, "[{provider}] Serialization error: {detail}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
