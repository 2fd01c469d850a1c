//! Certificate payloads: PKCS#1 certificates, SCEP and ACME enrollment.

use crate::model::payload::{ACME_PAYLOAD_TYPE, PKCS1_PAYLOAD_TYPE, SCEP_PAYLOAD_TYPE};
use crate::model::{MultiString, Payload};

/// X.500 subject as a sequence of RDNs, each a sequence of
/// `[oid-or-short-name, value]` pairs.
///
/// Example: `[[["C", "US"]], [["O", "Example Inc."]], [["CN", "device"]]]`.
pub type Subject = Vec<Vec<Vec<String>>>;

/// A DER certificate (`com.apple.security.pkcs1`).
///
/// The certificate bytes are carried as-is; nothing here parses them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CertificatePkcs1Payload {
    pub payload: Payload,
    pub certificate_file_name: String,
    /// DER-encoded certificate.
    pub content: Vec<u8>,
}

impl CertificatePkcs1Payload {
    /// Creates a certificate payload with identifier `identifier`.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            payload: Payload::new(PKCS1_PAYLOAD_TYPE, identifier),
            ..Default::default()
        }
    }
}

/// Subject alternative names requested for an enrolled certificate.
///
/// Each key accepts a single string or an array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubjectAltName {
    pub dns_names: MultiString,
    pub nt_principal_names: MultiString,
    pub rfc822_names: MultiString,
    pub uris: MultiString,
}

impl SubjectAltName {
    /// Returns true if no name of any kind is set.
    pub fn is_empty(&self) -> bool {
        self.dns_names.is_empty()
            && self.nt_principal_names.is_empty()
            && self.rfc822_names.is_empty()
            && self.uris.is_empty()
    }
}

/// The `PayloadContent` dictionary of a SCEP payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScepPayloadContent {
    pub url: String,
    pub name: String,
    pub subject: Subject,
    pub challenge: String,
    pub key_size: i64,
    pub key_type: String,
    pub key_usage: i64,
    pub retries: i64,
    pub retry_delay: i64,
    pub ca_fingerprint: Vec<u8>,
    pub allow_all_apps_access: bool,
    /// Devices treat an absent key as `true`.
    pub key_is_extractable: Option<bool>,
    pub subject_alt_name: Option<SubjectAltName>,
}

/// SCEP certificate enrollment (`com.apple.security.scep`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScepPayload {
    pub payload: Payload,
    pub content: ScepPayloadContent,
}

impl ScepPayload {
    /// Creates a SCEP payload with identifier `identifier`.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            payload: Payload::new(SCEP_PAYLOAD_TYPE, identifier),
            ..Default::default()
        }
    }
}

/// ACME certificate enrollment (`com.apple.security.acme`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AcmeCertificatePayload {
    pub payload: Payload,
    pub allow_all_apps_access: bool,
    pub attest: bool,
    pub client_identifier: String,
    pub directory_url: String,
    pub extended_key_usage: Vec<String>,
    pub hardware_bound: bool,
    pub key_size: i64,
    /// Devices treat an absent key as `true`.
    pub key_is_extractable: Option<bool>,
    /// `RSA` or `ECSECPrimeRandom`.
    pub key_type: String,
    pub subject: Subject,
    pub usage_flags: i64,
    pub subject_alt_name: Option<SubjectAltName>,
}

impl AcmeCertificatePayload {
    /// Creates an ACME payload with identifier `identifier`.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            payload: Payload::new(ACME_PAYLOAD_TYPE, identifier),
            ..Default::default()
        }
    }
}
