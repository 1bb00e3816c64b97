//! GoDaddy error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{GodaddyProvider, PROVIDER_NAME};

/// GoDaddy signals failures through the HTTP status; the body's `code`
/// (e.g. `UNABLE_TO_AUTHENTICATE`, `NOT_FOUND`, `INVALID_BODY`) only refines it.
impl ProviderErrorMapper for GodaddyProvider {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn map_error(&self, raw: RawApiError, context: &ErrorContext) -> ProviderError {
        let raw_message = (!raw.message.is_empty()).then(|| raw.message.clone());
        match raw.status {
            401 => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message,
            },
            403 => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message,
            },
            404 => ProviderError::NotFound {
                provider: self.provider_name().to_string(),
                resource: context.resource(),
                raw_message,
            },
            _ => self.api_error(raw),
        }
    }
}
