use std::fmt;

use serde::{Deserialize, Serialize};

use godaddy_dns_provider::{DnsRecord, RecordType};

use crate::error::{CoreError, CoreResult};

/// Identity of one record within a domain.
///
/// The registrar has no per-record id, so a record is addressed by its group
/// (`record_type`, `name`) plus its exact `data`. The string form
/// `domain/type/name/data` is what [`ImportId`] accepts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordKey {
    pub domain: String,
    pub record_type: RecordType,
    pub name: String,
    pub data: String,
}

impl RecordKey {
    #[must_use]
    pub fn new(
        domain: impl Into<String>,
        record_type: RecordType,
        name: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            record_type,
            name: name.into(),
            data: data.into(),
        }
    }

    /// Key of `record` within `domain`.
    #[must_use]
    pub fn of(domain: &str, record: &DnsRecord) -> Self {
        Self::new(domain, record.record_type, &record.name, &record.data)
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.domain, self.record_type, self.name, self.data
        )
    }
}

/// Parsed import identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportId {
    /// `domain/type/name`: resolved by reading the group, which must hold exactly one record.
    Group {
        domain: String,
        record_type: RecordType,
        name: String,
    },
    /// `domain/type/name/data`: taken as-is.
    Record(RecordKey),
}

impl ImportId {
    /// Parse `domain/type/name` or `domain/type/name/data`.
    ///
    /// Everything after the third `/` is the data, so data containing slashes
    /// (URI targets, some TXT values) survives.
    pub fn parse(id: &str) -> CoreResult<Self> {
        let invalid = |reason: String| CoreError::InvalidImportId {
            id: id.to_string(),
            reason,
        };

        let parts: Vec<&str> = id.splitn(4, '/').collect();
        if parts.len() < 3 {
            return Err(invalid(format!(
                "expected domain/type/name or domain/type/name/data, got {} part(s)",
                parts.len()
            )));
        }
        if let Some(pos) = parts.iter().position(|p| p.is_empty()) {
            return Err(invalid(format!("part {} is empty", pos + 1)));
        }

        let record_type: RecordType = parts[1].parse().map_err(|e| invalid(format!("{e}")))?;
        let domain = parts[0].to_string();
        let name = parts[2].to_string();

        Ok(match parts.get(3) {
            Some(data) => Self::Record(RecordKey {
                domain,
                record_type,
                name,
                data: (*data).to_string(),
            }),
            None => Self::Group {
                domain,
                record_type,
                name,
            },
        })
    }
}

/// Result of an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedRecord {
    /// Canonical key; `key.to_string()` is the four-part id.
    pub key: RecordKey,
    /// The record as read from the registrar. `None` when a four-part id was imported
    /// without reading the group.
    pub record: Option<DnsRecord>,
}

/// How create/update treat a record whose `data` already exists in its group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Write through; the registrar stores the duplicate.
    #[default]
    Allow,
    /// Fail with [`CoreError::DuplicateRecord`].
    Reject,
    /// Succeed without writing.
    Skip,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_display_is_four_part_id() {
        let key = RecordKey::new("example.com", RecordType::A, "www", "192.0.2.1");
        assert_eq!(key.to_string(), "example.com/A/www/192.0.2.1");
    }

    #[test]
    fn parse_three_part() {
        let id = ImportId::parse("example.com/a/www").unwrap();
        assert_eq!(
            id,
            ImportId::Group {
                domain: "example.com".to_string(),
                record_type: RecordType::A,
                name: "www".to_string(),
            }
        );
    }

    #[test]
    fn parse_four_part_keeps_slashes_in_data() {
        let id = ImportId::parse("example.com/URI/_docs/https://example.com/a/b").unwrap();
        let ImportId::Record(key) = id else {
            panic!("expected a four-part id");
        };
        assert_eq!(key.record_type, RecordType::Uri);
        assert_eq!(key.data, "https://example.com/a/b");
        assert_eq!(key.to_string(), "example.com/URI/_docs/https://example.com/a/b");
    }

    #[test]
    fn parse_rejects_short_ids() {
        for id in ["example.com", "example.com/A", ""] {
            assert!(
                matches!(ImportId::parse(id), Err(CoreError::InvalidImportId { .. })),
                "{id} should be rejected"
            );
        }
    }

    #[test]
    fn parse_rejects_empty_parts() {
        assert!(matches!(
            ImportId::parse("example.com//www"),
            Err(CoreError::InvalidImportId { reason, .. }) if reason == "part 2 is empty"
        ));
    }

    #[test]
    fn parse_rejects_unknown_type() {
        assert!(matches!(
            ImportId::parse("example.com/SPF/www"),
            Err(CoreError::InvalidImportId { reason, .. }) if reason.contains("not supported")
        ));
    }

    #[test]
    fn duplicate_policy_defaults_to_allow() {
        assert_eq!(DuplicatePolicy::default(), DuplicatePolicy::Allow);
        assert_eq!(
            serde_json::to_string(&DuplicatePolicy::Reject).unwrap(),
            "\"reject\""
        );
    }
}
