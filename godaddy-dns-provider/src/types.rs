use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

// ============ DNS Record Types ============

/// DNS record type supported by the registrar.
///
/// Serialized as uppercase strings (`"A"`, `"AAAA"`, `"CNAME"`, etc.) and parsed
/// case-insensitively through [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Certificate Authority Authorization record.
    Caa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record.
    Mx,
    /// Name server record.
    Ns,
    /// Pointer record.
    Ptr,
    /// Start of authority record.
    Soa,
    /// Service locator record.
    Srv,
    /// Text record.
    Txt,
    /// Delegation signer record.
    Ds,
    /// SSH public key fingerprint record.
    Sshfp,
    /// TLS certificate association record.
    Tlsa,
    /// Location record.
    Loc,
    /// Naming authority pointer record.
    Naptr,
    /// Uniform resource identifier record.
    Uri,
    /// Certificate record.
    Cert,
    /// Delegation name record.
    Dname,
}

impl RecordType {
    /// Every record type the registrar accepts, in documentation order.
    pub const ALL: [Self; 18] = [
        Self::A,
        Self::Aaaa,
        Self::Caa,
        Self::Cname,
        Self::Mx,
        Self::Ns,
        Self::Ptr,
        Self::Soa,
        Self::Srv,
        Self::Txt,
        Self::Ds,
        Self::Sshfp,
        Self::Tlsa,
        Self::Loc,
        Self::Naptr,
        Self::Uri,
        Self::Cert,
        Self::Dname,
    ];

    /// Uppercase wire name, as used in API paths and bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Caa => "CAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Ptr => "PTR",
            Self::Soa => "SOA",
            Self::Srv => "SRV",
            Self::Txt => "TXT",
            Self::Ds => "DS",
            Self::Sshfp => "SSHFP",
            Self::Tlsa => "TLSA",
            Self::Loc => "LOC",
            Self::Naptr => "NAPTR",
            Self::Uri => "URI",
            Self::Cert => "CERT",
            Self::Dname => "DNAME",
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| ValidationError::UnknownRecordType {
                value: s.to_string(),
            })
    }
}

/// A single DNS record as the registrar models it.
///
/// Records carry no identifier of their own. Within a group (same type and name) two
/// records are the same record exactly when their `data` strings are equal.
///
/// The optional fields are only meaningful for the types that need them:
/// `priority` for MX/NAPTR/SRV/URI, `weight` for SRV/URI, and `port`, `service`,
/// `protocol` for SRV. See [`validate_record`](crate::validate_record).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Record type.
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Host label relative to the domain, or `"@"` for the apex.
    pub name: String,
    /// Record data (address, target, text, ...).
    pub data: String,
    /// Time to live in seconds.
    pub ttl: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

impl DnsRecord {
    /// Create a record with only the fields every type shares.
    pub fn new(
        record_type: RecordType,
        name: impl Into<String>,
        data: impl Into<String>,
        ttl: u32,
    ) -> Self {
        Self {
            record_type,
            name: name.into(),
            data: data.into(),
            ttl,
            priority: None,
            port: None,
            weight: None,
            service: None,
            protocol: None,
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Set the SRV service triple (`_service._protocol` and port).
    #[must_use]
    pub fn with_service(
        mut self,
        service: impl Into<String>,
        protocol: impl Into<String>,
        port: u32,
    ) -> Self {
        self.service = Some(service.into());
        self.protocol = Some(protocol.into());
        self.port = Some(port);
        self
    }
}

// ============ Domain Types ============

/// Domain summary as returned by `GET /v1/domains`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainSummary {
    pub domain: String,
    #[serde(default)]
    pub domain_id: u64,
    /// Registrar status string (e.g. `"ACTIVE"`, `"CANCELLED"`).
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expiration_protected: bool,
    #[serde(default)]
    pub hold_registrar: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub privacy: bool,
    #[serde(default)]
    pub renew_auto: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renew_deadline: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renewable: Option<bool>,
    #[serde(default)]
    pub transfer_protected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

/// Full domain detail as returned by `GET /v1/domains/{domain}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainDetail {
    #[serde(flatten)]
    pub summary: DomainSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_code: Option<String>,
    #[serde(default)]
    pub contact_admin: Contact,
    #[serde(default)]
    pub contact_billing: Contact,
    #[serde(default)]
    pub contact_registrant: Contact,
    #[serde(default)]
    pub contact_tech: Contact,
    #[serde(default)]
    pub name_servers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dnssec: Option<Dnssec>,
}

/// Registrant/admin/billing/tech contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub name_first: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_middle: Option<String>,
    #[serde(default)]
    pub name_last: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fax: Option<String>,
    #[serde(default)]
    pub address_mailing: Address,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default)]
    pub address1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dnssec {
    pub enabled: bool,
    #[serde(default)]
    pub keys: Vec<DnssecKey>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnssecKey {
    pub algorithm: u32,
    pub flags: u32,
    pub protocol: u32,
    pub public_key: String,
}

/// Body of `PATCH /v1/domains/{domain}`. Only fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_servers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renew_auto: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subaccount_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expose_whois: Option<bool>,
}

impl DomainUpdate {
    /// Whether the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Contact quadruple as returned by `GET /v1/domains/{domain}/contacts`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainContactSet {
    #[serde(default)]
    pub contact_admin: Contact,
    #[serde(default)]
    pub contact_billing: Contact,
    #[serde(default)]
    pub contact_registrant: Contact,
    #[serde(default)]
    pub contact_tech: Contact,
}

/// Body of `PATCH /v1/domains/{domain}/contacts`. Only contacts that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainContacts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_admin: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_billing: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_registrant: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_tech: Option<Contact>,
}

impl DomainContacts {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Result of `GET /v1/domains/available`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainAvailability {
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default)]
    pub definitive: bool,
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<u32>,
    /// Price in micro-units of `currency`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
}

/// Body of `POST /v1/domains/purchase`.
///
/// Purchasing is a one-shot registrar call and is never reconciled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainPurchase {
    pub consent: DomainConsent,
    pub contact_admin: Contact,
    pub contact_billing: Contact,
    pub contact_registrant: Contact,
    pub contact_tech: Contact,
    pub domain: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name_servers: Vec<String>,
    pub period: u32,
    pub privacy: bool,
    pub renew_auto: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainConsent {
    pub agreed_at: String,
    pub agreed_by: String,
    pub agreement_keys: Vec<String>,
}

// ============ Credential Types ============

/// Errors from credential validation.
///
/// Returned by [`Credentials::new`] and [`ClientConfig::from_env`](crate::ClientConfig::from_env)
/// when a required field is missing or malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CredentialValidationError {
    /// A required credential field is missing entirely.
    MissingField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A credential field is present but empty/whitespace-only.
    EmptyField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A field has an invalid format.
    InvalidFormat {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
        /// Description of what's wrong with the format.
        reason: String,
    },
}

impl std::fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { label, .. } => write!(f, "Missing required field: {label}"),
            Self::EmptyField { label, .. } => write!(f, "Field must not be empty: {label}"),
            Self::InvalidFormat { label, reason, .. } => write!(f, "{label}: {reason}"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// API key/secret pair sent as `Authorization: sso-key <key>:<secret>`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    /// Build credentials, rejecting missing or blank values.
    pub fn new(
        api_key: Option<String>,
        api_secret: Option<String>,
    ) -> Result<Self, CredentialValidationError> {
        Ok(Self {
            api_key: Self::required(api_key, "api_key", "API Key")?,
            api_secret: Self::required(api_secret, "api_secret", "API Secret")?,
        })
    }

    fn required(
        value: Option<String>,
        key: &str,
        label: &str,
    ) -> Result<String, CredentialValidationError> {
        match value {
            None => Err(CredentialValidationError::MissingField {
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) => Ok(v),
        }
    }

    /// Value of the `Authorization` header.
    pub(crate) fn authorization_header(&self) -> String {
        format!("sso-key {}:{}", self.api_key, self.api_secret)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &crate::utils::log_sanitizer::mask_secret(&self.api_key))
            .field("api_secret", &"***")
            .finish()
    }
}
