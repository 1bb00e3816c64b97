//! Record validation
//!
//! Pure checks run before any request is built. A record that fails here never reaches
//! the transport.

use serde::{Deserialize, Serialize};

use crate::types::{DnsRecord, RecordType};

/// Minimum TTL the registrar accepts (10 minutes).
pub const MIN_TTL: u32 = 600;
/// Maximum TTL the registrar accepts (30 days).
pub const MAX_TTL: u32 = 2_592_000;
/// Upper bound shared by priority, weight and port.
pub const MAX_U16_FIELD: u32 = 65_535;
/// Maximum length of a host name target.
const MAX_HOSTNAME_LEN: usize = 253;
/// Maximum length of TXT data.
const MAX_TXT_LEN: usize = 65_535;

/// Optional record field whose presence depends on the record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordField {
    Priority,
    Weight,
    Port,
    Service,
    Protocol,
}

impl RecordField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Priority => "priority",
            Self::Weight => "weight",
            Self::Port => "port",
            Self::Service => "service",
            Self::Protocol => "protocol",
        }
    }

    fn is_present(self, record: &DnsRecord) -> bool {
        match self {
            Self::Priority => record.priority.is_some(),
            Self::Weight => record.weight.is_some(),
            Self::Port => record.port.is_some(),
            Self::Service => record.service.is_some(),
            Self::Protocol => record.protocol.is_some(),
        }
    }
}

impl std::fmt::Display for RecordField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record rejected before reaching the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ValidationError {
    /// The type string is not one of the supported record types.
    UnknownRecordType { value: String },

    /// A field required by the record type is absent.
    MissingField {
        record_type: RecordType,
        field: RecordField,
    },

    /// `data` does not have the shape the record type requires.
    InvalidData {
        record_type: RecordType,
        reason: String,
    },

    /// A numeric field lies outside its accepted range.
    OutOfRange {
        field: String,
        value: u32,
        min: u32,
        max: u32,
    },

    /// An SRV service or protocol label does not start with `_`.
    MissingUnderscore { field: RecordField, value: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownRecordType { value } => {
                let valid: Vec<&str> = RecordType::ALL.iter().map(|t| t.as_str()).collect();
                write!(
                    f,
                    "DNS record type '{value}' is not supported. Valid types are: {}",
                    valid.join(", ")
                )
            }
            Self::MissingField { record_type, field } => {
                write!(f, "{record_type} records require a {field} value")
            }
            Self::InvalidData {
                record_type,
                reason,
            } => write!(f, "invalid data for {record_type} record: {reason}"),
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} must be between {min} and {max}, got {value}"),
            Self::MissingUnderscore { field, value } => write!(
                f,
                "SRV {field} must start with underscore (e.g., {}), got '{value}'",
                if *field == RecordField::Service {
                    "_sip"
                } else {
                    "_tcp"
                }
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Fields the given record type cannot be submitted without.
pub fn required_fields(record_type: RecordType) -> &'static [RecordField] {
    match record_type {
        RecordType::Mx | RecordType::Naptr => &[RecordField::Priority],
        RecordType::Srv => &[
            RecordField::Priority,
            RecordField::Weight,
            RecordField::Port,
            RecordField::Service,
            RecordField::Protocol,
        ],
        RecordType::Uri => &[RecordField::Priority, RecordField::Weight],
        _ => &[],
    }
}

/// Validate a complete record: data shape, required fields, numeric ranges and SRV labels.
pub fn validate_record(record: &DnsRecord) -> Result<(), ValidationError> {
    validate_record_data(record.record_type, &record.data)?;

    for field in required_fields(record.record_type) {
        if !field.is_present(record) {
            return Err(ValidationError::MissingField {
                record_type: record.record_type,
                field: *field,
            });
        }
    }

    validate_range("ttl", record.ttl, MIN_TTL, MAX_TTL)?;
    if let Some(priority) = record.priority {
        validate_range("priority", priority, 0, MAX_U16_FIELD)?;
    }
    if let Some(weight) = record.weight {
        validate_range("weight", weight, 0, MAX_U16_FIELD)?;
    }
    if let Some(port) = record.port {
        validate_range("port", port, 1, MAX_U16_FIELD)?;
    }

    if record.record_type == RecordType::Srv {
        for (field, value) in [
            (RecordField::Service, &record.service),
            (RecordField::Protocol, &record.protocol),
        ] {
            if let Some(value) = value
                && !value.starts_with('_')
            {
                return Err(ValidationError::MissingUnderscore {
                    field,
                    value: value.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Validate `data` against the format the record type requires.
///
/// Types without a specific rule (SOA, LOC, CERT, DNAME) always pass.
pub fn validate_record_data(record_type: RecordType, data: &str) -> Result<(), ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidData {
        record_type,
        reason,
    };

    match record_type {
        RecordType::A => {
            if !is_ipv4(data) {
                return Err(invalid(format!("invalid IPv4 address: {data}")));
            }
        }
        RecordType::Aaaa => {
            if !data.contains(':') {
                return Err(invalid(format!("invalid IPv6 address: {data}")));
            }
        }
        RecordType::Caa => {
            let fields: Vec<&str> = data.split_whitespace().collect();
            if fields.len() < 3 {
                return Err(invalid(
                    "CAA record must have format: flags tag value".to_string(),
                ));
            }
            if fields[0].parse::<u8>().is_err() {
                return Err(invalid("CAA flags must be 0-255".to_string()));
            }
        }
        RecordType::Cname
        | RecordType::Mx
        | RecordType::Ns
        | RecordType::Ptr
        | RecordType::Srv => {
            if data.is_empty() || data.chars().count() > MAX_HOSTNAME_LEN {
                return Err(invalid("invalid domain name length".to_string()));
            }
        }
        RecordType::Txt => {
            if data.chars().count() > MAX_TXT_LEN {
                return Err(invalid(format!(
                    "TXT record too long (max {MAX_TXT_LEN} characters)"
                )));
            }
        }
        RecordType::Ds => expect_fields(
            data,
            4,
            "DS record must have format: key_tag algorithm digest_type digest",
        )
        .map_err(invalid)?,
        RecordType::Sshfp => expect_fields(
            data,
            3,
            "SSHFP record must have format: algorithm fp_type fingerprint",
        )
        .map_err(invalid)?,
        RecordType::Tlsa => expect_fields(
            data,
            4,
            "TLSA record must have format: cert_usage selector matching_type cert_data",
        )
        .map_err(invalid)?,
        RecordType::Naptr => {
            if data.split_whitespace().count() < 6 {
                return Err(invalid(
                    "NAPTR record must have format: order preference flags service regexp replacement"
                        .to_string(),
                ));
            }
        }
        RecordType::Uri => {
            if !data.starts_with("http://") && !data.starts_with("https://") {
                return Err(invalid(
                    "URI record must start with http:// or https://".to_string(),
                ));
            }
        }
        RecordType::Soa | RecordType::Loc | RecordType::Cert | RecordType::Dname => {}
    }

    Ok(())
}

fn validate_range(field: &str, value: u32, min: u32, max: u32) -> Result<(), ValidationError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        })
    }
}

fn expect_fields(data: &str, count: usize, format: &str) -> Result<(), String> {
    if data.split_whitespace().count() == count {
        Ok(())
    } else {
        Err(format.to_string())
    }
}

// 每段必须是 0-255 的十进制数
fn is_ipv4(data: &str) -> bool {
    let octets: Vec<&str> = data.split('.').collect();
    octets.len() == 4
        && octets
            .iter()
            .all(|o| !o.is_empty() && o.bytes().all(|b| b.is_ascii_digit()) && o.parse::<u8>().is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(record_type: RecordType, data: &str) -> DnsRecord {
        DnsRecord::new(record_type, "www", data, 3600)
    }

    // ---- data formats ----

    #[test]
    fn a_record_octets() {
        assert!(validate_record_data(RecordType::A, "192.0.2.1").is_ok());
        assert!(validate_record_data(RecordType::A, "255.255.255.255").is_ok());
        assert!(validate_record_data(RecordType::A, "256.0.0.1").is_err());
        assert!(validate_record_data(RecordType::A, "192.0.2").is_err());
        assert!(validate_record_data(RecordType::A, "192.0.2.x").is_err());
        assert!(validate_record_data(RecordType::A, "192.0..1").is_err());
    }

    #[test]
    fn aaaa_requires_colon() {
        assert!(validate_record_data(RecordType::Aaaa, "2001:db8::1").is_ok());
        assert!(validate_record_data(RecordType::Aaaa, "192.0.2.1").is_err());
    }

    #[test]
    fn caa_flags_range() {
        assert!(validate_record_data(RecordType::Caa, "0 issue letsencrypt.org").is_ok());
        assert!(validate_record_data(RecordType::Caa, "128 issuewild letsencrypt.org").is_ok());
        assert!(validate_record_data(RecordType::Caa, "300 issue letsencrypt.org").is_err());
        assert!(validate_record_data(RecordType::Caa, "0 issue").is_err());
    }

    #[test]
    fn hostname_length_limits() {
        assert!(validate_record_data(RecordType::Cname, "target.example.com").is_ok());
        assert!(validate_record_data(RecordType::Cname, "").is_err());
        assert!(validate_record_data(RecordType::Ns, &"a".repeat(253)).is_ok());
        assert!(validate_record_data(RecordType::Ptr, &"a".repeat(254)).is_err());
    }

    #[test]
    fn txt_length_limit() {
        assert!(validate_record_data(RecordType::Txt, "v=spf1 -all").is_ok());
        assert!(validate_record_data(RecordType::Txt, &"x".repeat(65_535)).is_ok());
        assert!(validate_record_data(RecordType::Txt, &"x".repeat(65_536)).is_err());
    }

    #[test]
    fn field_counts() {
        assert!(validate_record_data(RecordType::Ds, "12345 13 2 ABCDEF").is_ok());
        assert!(validate_record_data(RecordType::Ds, "12345 13 2").is_err());
        assert!(validate_record_data(RecordType::Sshfp, "4 2 123456789abcdef").is_ok());
        assert!(validate_record_data(RecordType::Sshfp, "4 2 12 34").is_err());
        assert!(validate_record_data(RecordType::Tlsa, "3 1 1 abcdef").is_ok());
        assert!(validate_record_data(RecordType::Tlsa, "3 1 1").is_err());
        assert!(
            validate_record_data(RecordType::Naptr, "100 10 \"S\" \"SIP+D2U\" \"\" _sip._udp")
                .is_ok()
        );
        assert!(validate_record_data(RecordType::Naptr, "100 10 S SIP").is_err());
    }

    #[test]
    fn uri_scheme() {
        assert!(validate_record_data(RecordType::Uri, "https://example.com/").is_ok());
        assert!(validate_record_data(RecordType::Uri, "ftp://example.com/").is_err());
    }

    #[test]
    fn unchecked_types_pass() {
        for t in [
            RecordType::Soa,
            RecordType::Loc,
            RecordType::Cert,
            RecordType::Dname,
        ] {
            assert!(validate_record_data(t, "anything at all").is_ok());
        }
    }

    // ---- required fields ----

    #[test]
    fn mx_requires_priority() {
        let err = validate_record(&record(RecordType::Mx, "mail.example.com")).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField {
                record_type: RecordType::Mx,
                field: RecordField::Priority,
            }
        );
        assert!(
            validate_record(&record(RecordType::Mx, "mail.example.com").with_priority(10)).is_ok()
        );
    }

    #[test]
    fn srv_requires_every_field() {
        let full = record(RecordType::Srv, "sip.example.com")
            .with_priority(10)
            .with_weight(5)
            .with_service("_sip", "_tcp", 5060);
        assert!(validate_record(&full).is_ok());

        for field in required_fields(RecordType::Srv) {
            let mut partial = full.clone();
            match field {
                RecordField::Priority => partial.priority = None,
                RecordField::Weight => partial.weight = None,
                RecordField::Port => partial.port = None,
                RecordField::Service => partial.service = None,
                RecordField::Protocol => partial.protocol = None,
            }
            let err = validate_record(&partial).unwrap_err();
            assert_eq!(
                err,
                ValidationError::MissingField {
                    record_type: RecordType::Srv,
                    field: *field,
                }
            );
        }
    }

    #[test]
    fn srv_labels_need_underscore() {
        let bad = record(RecordType::Srv, "sip.example.com")
            .with_priority(10)
            .with_weight(5)
            .with_service("sip", "_tcp", 5060);
        assert!(matches!(
            validate_record(&bad),
            Err(ValidationError::MissingUnderscore {
                field: RecordField::Service,
                ..
            })
        ));
    }

    #[test]
    fn uri_requires_priority_and_weight() {
        let err = validate_record(&record(RecordType::Uri, "https://example.com").with_priority(1))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField {
                record_type: RecordType::Uri,
                field: RecordField::Weight,
            }
        );
    }

    // ---- ranges ----

    #[test]
    fn ttl_bounds() {
        let mut r = record(RecordType::A, "192.0.2.1");
        r.ttl = 599;
        assert!(matches!(
            validate_record(&r),
            Err(ValidationError::OutOfRange { ref field, .. }) if field == "ttl"
        ));
        r.ttl = 600;
        assert!(validate_record(&r).is_ok());
        r.ttl = 2_592_000;
        assert!(validate_record(&r).is_ok());
        r.ttl = 2_592_001;
        assert!(validate_record(&r).is_err());
    }

    #[test]
    fn port_and_priority_bounds() {
        let base = record(RecordType::Srv, "sip.example.com")
            .with_weight(0)
            .with_priority(65_535);
        assert!(validate_record(&base.clone().with_service("_sip", "_tcp", 1)).is_ok());
        assert!(validate_record(&base.clone().with_service("_sip", "_tcp", 0)).is_err());
        assert!(
            validate_record(&base.with_priority(65_536).with_service("_sip", "_tcp", 5060))
                .is_err()
        );
    }

    #[test]
    fn display_names_field_and_type() {
        let err = ValidationError::MissingField {
            record_type: RecordType::Srv,
            field: RecordField::Port,
        };
        assert_eq!(err.to_string(), "SRV records require a port value");
    }
}
