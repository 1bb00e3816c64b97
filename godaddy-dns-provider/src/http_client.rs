//! Generic HTTP client tools
//!
//! Sends prepared requests, logs them, and applies the registrar's rate-limit
//! retry rules. Callers construct the `RequestBuilder` themselves (URL, auth,
//! body) and map non-success statuses afterwards.
//!
//! # Retry rules
//! - Only HTTP 429 is retried; every other status is returned to the caller as-is.
//! - The wait honours `retryAfterSec` from the 429 body when it is positive,
//!   otherwise it is `2^attempt` policy units.
//! - Waiting is raced against the caller's [`CancellationToken`].

use std::time::Duration;

use reqwest::RequestBuilder;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::config::RetryPolicy;
use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

const RATE_LIMITED: u16 = 429;
const RETRY_AFTER_MARKER: &str = "retryAfterSec\":";
/// Upper bound on the backoff exponent so `2^attempt` cannot overflow.
const MAX_BACKOFF_EXPONENT: u32 = 20;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the status and response text
    ///
    /// Any status is returned as `Ok`; only transport failures are errors.
    ///
    /// # Arguments
    /// * `request_builder` - configured request constructor (including URL, headers, body, etc.)
    /// * `provider_name` - Provider name (for logging)
    /// * `method_name` - request method name (such as "GET", "PUT", used for logs)
    /// * `url` - request URL (for logging)
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url: &str,
    ) -> Result<(u16, String), ProviderError> {
        log::debug!("[{provider_name}] {method_name} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status_code}");

        // The body is read in full before the connection goes back to the pool,
        // error statuses included.
        let response_text = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parse JSON response
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(ProviderError::ParseError)` - parsing failed
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{provider_name}] JSON parse failed: {e}");
            log::error!(
                "[{provider_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// Performs an HTTP request, retrying on HTTP 429
    ///
    /// The same request (method, URL, body) is resent at most `policy.max_retries` times.
    /// Both the in-flight request and the wait between attempts are abandoned as soon
    /// as `cancel` fires.
    ///
    /// # Returns
    /// * `Ok((status_code, response_text))` - the first non-429 response
    /// * `Err(ProviderError::RateLimitExhausted)` - every attempt answered 429
    /// * `Err(ProviderError::Cancelled)` - `cancel` fired
    /// * `Err(ProviderError::NetworkError | Timeout)` - transport failure (never retried)
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url: &str,
        policy: RetryPolicy,
        cancel: &CancellationToken,
    ) -> Result<(u16, String), ProviderError> {
        let cancelled = || ProviderError::Cancelled {
            provider: provider_name.to_string(),
        };
        let mut attempt: u32 = 0;

        loop {
            // RequestBuilder can only be sent once
            let Some(req) = request_builder.try_clone() else {
                log::warn!("[{provider_name}] Cannot clone request, disabling retry");
                return tokio::select! {
                    biased;
                    () = cancel.cancelled() => Err(cancelled()),
                    res = Self::execute_request(request_builder, provider_name, method_name, url) => res,
                };
            };

            let (status, body) = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(cancelled()),
                res = Self::execute_request(req, provider_name, method_name, url) => res?,
            };

            if status != RATE_LIMITED {
                return Ok((status, body));
            }

            if attempt >= policy.max_retries {
                log::warn!(
                    "[{provider_name}] Rate limited (HTTP 429), giving up after {} attempts",
                    attempt + 1
                );
                return Err(ProviderError::RateLimitExhausted {
                    provider: provider_name.to_string(),
                    attempts: attempt + 1,
                    raw_message: Some(body),
                });
            }

            let hint = parse_retry_after(&body);
            let delay = retry_delay(hint, attempt, policy.unit);
            log::warn!(
                "[{}] Rate limited (HTTP 429, attempt {}/{}), retry_after={hint:?}, retrying in {:.3}s",
                provider_name,
                attempt + 1,
                policy.max_retries + 1,
                delay.as_secs_f32()
            );

            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(cancelled()),
                () = tokio::time::sleep(delay) => {}
            }
            attempt += 1;
        }
    }
}

#[derive(Deserialize)]
struct RateLimitBody {
    #[serde(rename = "retryAfterSec")]
    retry_after_sec: Option<i64>,
}

/// Extract a positive `retryAfterSec` from a 429 body
///
/// The structured decode is tried first; bodies that are not valid JSON (or
/// carry the field with an unexpected shape) fall back to a textual scan for
/// `retryAfterSec":<digits>`.
fn parse_retry_after(body: &str) -> Option<u64> {
    if let Ok(decoded) = serde_json::from_str::<RateLimitBody>(body)
        && let Some(secs) = decoded.retry_after_sec
        && let Ok(secs) = u64::try_from(secs)
        && secs > 0
    {
        return Some(secs);
    }

    let start = body.find(RETRY_AFTER_MARKER)? + RETRY_AFTER_MARKER.len();
    let digits: String = body[start..]
        .chars()
        .skip_while(|c| *c == ' ')
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse::<u64>().ok().filter(|secs| *secs > 0)
}

/// Calculate retry delay
///
/// A hint from the API is used verbatim (in policy units); without one the
/// exponential backoff applies.
fn retry_delay(hint: Option<u64>, attempt: u32, unit: Duration) -> Duration {
    match hint {
        Some(secs) => unit.saturating_mul(u32::try_from(secs).unwrap_or(u32::MAX)),
        None => backoff_delay(attempt, unit),
    }
}

/// Calculate exponential backoff delay
///
/// Backoff strategy: 1, 2, 4, 8, ... units
fn backoff_delay(attempt: u32, unit: Duration) -> Duration {
    let capped_attempt = attempt.min(MAX_BACKOFF_EXPONENT);
    unit.saturating_mul(1_u32 << capped_attempt)
}
