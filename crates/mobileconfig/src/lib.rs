//! Apple configuration profiles (`.mobileconfig`) for Rust.
//!
//! This crate decodes and encodes configuration profiles: property-list
//! documents whose `PayloadContent` array holds payloads of many kinds, told
//! apart only by their `PayloadType` string.
//!
//! # Overview
//!
//! - **Discriminated payloads**: each payload is decoded into the shape
//!   registered for its `PayloadType`; unrecognized types keep their common
//!   keys as [`PayloadValue::Unknown`]
//! - **Single-or-list strings**: fields such as SCEP subject alternative
//!   names accept a bare string or an array ([`MultiString`])
//! - **XML and binary**: input format is detected; output is XML unless
//!   binary is requested
//!
//! # Quick Start
//!
//! ```rust
//! use mobileconfig::{MdmPayload, ProfileBuilder, decode_profile, encode_profile};
//!
//! let profile = ProfileBuilder::new("com.example.enrollment")
//!     .display_name("Example Enrollment")
//!     .payload_with(MdmPayload::new("com.example.enrollment.mdm"), |mdm| {
//!         mdm.topic = "com.apple.mgmt.External.example".to_string();
//!         mdm.server_url = "https://mdm.example.com/mdm".to_string();
//!     })
//!     .build();
//!
//! let bytes = encode_profile(&profile).unwrap();
//! let decoded = decode_profile(&bytes).unwrap();
//! assert_eq!(decoded.mdm_payloads()[0].topic, "com.apple.mgmt.External.example");
//! ```
//!
//! # Modules
//!
//! - [`model`]: Profile, payload and field types
//! - [`codec`]: Property-list encoding/decoding
//! - [`error`]: Error types
//! - [`limits`]: Limits for decoding
//!
//! # Errors
//!
//! Decode errors carry the key path at which they were raised, for example
//! `PayloadContent[0].PayloadContent.SubjectAltName.dNSName`.

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;

// Re-export commonly used types at crate root
pub use codec::{
    EncodeOptions, Format, decode_profile, encode_profile, encode_profile_with_options,
};
pub use error::{DecodeError, EncodeError};
pub use model::{
    AcmeCertificatePayload, CertificatePkcs1Payload, MdmPayload, MultiString, Payload,
    PayloadKind, PayloadValue, PayloadVariant, Profile, ProfileBuilder, ScepPayload,
    ScepPayloadContent, Subject, SubjectAltName,
};
pub use model::id::{new_payload_uuid, parse_payload_uuid};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
