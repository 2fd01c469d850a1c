//! The top-level configuration profile.

use std::collections::BTreeMap;
use std::time::SystemTime;

use crate::model::id::same_payload_uuid;
use crate::model::{
    AcmeCertificatePayload, CertificatePkcs1Payload, MdmPayload, Payload, PayloadValue,
    PayloadVariant, ScepPayload,
};

/// `PayloadType` of a configuration profile.
pub const PROFILE_PAYLOAD_TYPE: &str = "Configuration";

/// An Apple configuration profile (`.mobileconfig`).
///
/// The profile's own identification keys live in `payload`; its payloads are
/// held in `payload_content`, in document order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Profile {
    pub payload: Payload,
    pub payload_content: Vec<PayloadValue>,
    pub expiration_date: Option<SystemTime>,
    pub removal_disallowed: bool,
    /// `System` or `User` on macOS.
    pub scope: String,
    pub date: Option<SystemTime>,
    /// Seconds after installation at which the profile is removed.
    pub duration_until_removal: f32,
    /// Localized consent text keyed by language code (or `default`).
    pub consent_text: BTreeMap<String, String>,
    pub encrypted_payload_content: Vec<u8>,
    pub has_removal_passcode: bool,
    pub is_encrypted: bool,
    pub removal_date: Option<SystemTime>,
    pub target_device_type: i64,
}

impl Profile {
    /// Creates an empty profile with identifier `identifier` and a fresh UUID.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            payload: Payload::new(PROFILE_PAYLOAD_TYPE, identifier),
            ..Default::default()
        }
    }

    /// Appends a payload.
    pub fn add_payload(&mut self, payload: impl Into<PayloadValue>) {
        self.payload_content.push(payload.into());
    }

    /// Returns every payload of variant `T`, in document order.
    pub fn payloads_of<T: PayloadVariant>(&self) -> Vec<&T> {
        self.payload_content
            .iter()
            .filter_map(T::from_payload)
            .collect()
    }

    /// Returns the payload whose `PayloadUUID` is `uuid` (case-insensitive).
    pub fn find_payload(&self, uuid: &str) -> Option<&PayloadValue> {
        self.payload_content
            .iter()
            .find(|p| same_payload_uuid(&p.common().uuid, uuid))
    }

    pub fn certificate_pkcs1_payloads(&self) -> Vec<&CertificatePkcs1Payload> {
        self.payloads_of()
    }

    pub fn mdm_payloads(&self) -> Vec<&MdmPayload> {
        self.payloads_of()
    }

    pub fn scep_payloads(&self) -> Vec<&ScepPayload> {
        self.payloads_of()
    }

    pub fn acme_certificate_payloads(&self) -> Vec<&AcmeCertificatePayload> {
        self.payloads_of()
    }

    /// Returns the payloads whose type has no dedicated shape.
    pub fn unknown_payloads(&self) -> Vec<&Payload> {
        self.payloads_of()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed_profile() -> Profile {
        let mut profile = Profile::new("com.example.profile");
        profile.add_payload(CertificatePkcs1Payload::new("com.example.cert.1"));
        profile.add_payload(Payload::new("com.apple.wifi.managed", "com.example.wifi"));
        profile.add_payload(MdmPayload::new("com.example.mdm"));
        profile.add_payload(CertificatePkcs1Payload::new("com.example.cert.2"));
        profile
    }

    #[test]
    fn test_new_profile() {
        let profile = Profile::new("com.example.profile");
        assert_eq!(profile.payload.payload_type, "Configuration");
        assert_eq!(profile.payload.identifier, "com.example.profile");
        assert_eq!(profile.payload.version, 1);
        assert!(profile.payload_content.is_empty());
    }

    #[test]
    fn test_query_by_variant_preserves_order() {
        let profile = mixed_profile();

        let certs = profile.certificate_pkcs1_payloads();
        assert_eq!(certs.len(), 2);
        assert_eq!(certs[0].payload.identifier, "com.example.cert.1");
        assert_eq!(certs[1].payload.identifier, "com.example.cert.2");

        assert_eq!(profile.mdm_payloads().len(), 1);
        assert!(profile.scep_payloads().is_empty());
        assert!(profile.acme_certificate_payloads().is_empty());

        let unknown = profile.unknown_payloads();
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].payload_type, "com.apple.wifi.managed");
    }

    #[test]
    fn test_find_payload_ignores_case() {
        let profile = mixed_profile();
        let uuid = profile.payload_content[2].common().uuid.to_lowercase();

        let found = profile.find_payload(&uuid).unwrap();
        assert_eq!(found.common().identifier, "com.example.mdm");
        assert!(profile.find_payload("00000000-0000-0000-0000-000000000000").is_none());
    }
}
