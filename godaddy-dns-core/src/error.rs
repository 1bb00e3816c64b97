//! Unified error type definition

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use godaddy_dns_provider::RecordType;

// Re-export library error types
pub use godaddy_dns_provider::{ProviderError, ValidationError};

/// Operation and target an error belongs to.
///
/// Rendered as `<operation> <domain>[ <type>[/<name>]]`, e.g. `update_record example.com A/www`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationContext {
    pub operation: &'static str,
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_type: Option<RecordType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl OperationContext {
    #[must_use]
    pub fn domain(operation: &'static str, domain: &str) -> Self {
        Self {
            operation,
            domain: domain.to_string(),
            record_type: None,
            name: None,
        }
    }

    #[must_use]
    pub fn group(operation: &'static str, domain: &str, record_type: RecordType, name: &str) -> Self {
        Self {
            operation,
            domain: domain.to_string(),
            record_type: Some(record_type),
            name: Some(name.to_string()),
        }
    }
}

impl fmt::Display for OperationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operation, self.domain)?;
        match (self.record_type, &self.name) {
            (Some(t), Some(name)) => write!(f, " {t}/{name}"),
            (Some(t), None) => write!(f, " {t}"),
            (None, Some(name)) => write!(f, " {name}"),
            (None, None) => Ok(()),
        }
    }
}

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Record rejected before any request was sent
    #[error("{context}: {source}")]
    Validation {
        context: OperationContext,
        source: ValidationError,
    },

    /// No record with the given data exists in the group
    #[error("{context}: record with data '{data}' not found")]
    RecordNotFound {
        context: OperationContext,
        data: String,
    },

    /// The group addressed by an import id holds no records
    #[error("{context}: no records found")]
    EmptyGroup { context: OperationContext },

    /// The domain is not registered in the account
    #[error("{context}: domain not found")]
    DomainNotFound { context: OperationContext },

    /// A three-part import id matched more than one record
    #[error(
        "found {count} {record_type} records named '{name}' in {domain}; \
         use the form domain/type/name/data to import a specific record"
    )]
    AmbiguousImport {
        domain: String,
        record_type: RecordType,
        name: String,
        count: usize,
    },

    /// The duplicate policy forbids writing a record whose data already exists
    #[error("{context}: a record with data '{data}' already exists")]
    DuplicateRecord {
        context: OperationContext,
        data: String,
    },

    /// The record's type or name does not belong to the group being updated
    #[error("{context}: record {record_type}/{name} does not belong to this group")]
    GroupMismatch {
        context: OperationContext,
        record_type: RecordType,
        name: String,
    },

    /// Malformed import identifier
    #[error("invalid import id '{id}': {reason}")]
    InvalidImportId { id: String, reason: String },

    /// Provider error with the operation that triggered it
    #[error("{context}: {source}")]
    Provider {
        context: OperationContext,
        source: ProviderError,
    },
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Validation { .. }
            | Self::RecordNotFound { .. }
            | Self::EmptyGroup { .. }
            | Self::DomainNotFound { .. }
            | Self::AmbiguousImport { .. }
            | Self::DuplicateRecord { .. }
            | Self::GroupMismatch { .. }
            | Self::InvalidImportId { .. } => true,
            Self::Provider { source, .. } => source.is_expected(),
        }
    }

    /// Whether the addressed record, group or domain is absent.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::RecordNotFound { .. } | Self::EmptyGroup { .. } | Self::DomainNotFound { .. } => {
                true
            }
            Self::Provider { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    /// The underlying provider error, if any.
    #[must_use]
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            Self::Provider { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
