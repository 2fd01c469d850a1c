//! Data model types for configuration profiles.
//!
//! This module contains the in-memory shapes of a profile:
//! - Payload UUIDs
//! - Common payload keys and the discriminated payload union
//! - Concrete payload shapes (certificates, SCEP, ACME, MDM)
//! - The single-or-list string field
//! - Profiles and a builder for them

pub mod builder;
pub mod certificate;
pub mod id;
pub mod mdm;
pub mod multi_string;
pub mod payload;
pub mod profile;

pub use builder::ProfileBuilder;
pub use certificate::{
    AcmeCertificatePayload, CertificatePkcs1Payload, ScepPayload, ScepPayloadContent, Subject,
    SubjectAltName,
};
pub use id::{format_payload_uuid, new_payload_uuid, parse_payload_uuid, same_payload_uuid};
pub use mdm::MdmPayload;
pub use multi_string::MultiString;
pub use payload::{
    ACME_PAYLOAD_TYPE, KNOWN_PAYLOAD_TYPES, MDM_PAYLOAD_TYPE, PKCS1_PAYLOAD_TYPE,
    SCEP_PAYLOAD_TYPE, Payload, PayloadKind, PayloadValue, PayloadVariant,
};
pub use profile::{PROFILE_PAYLOAD_TYPE, Profile};
