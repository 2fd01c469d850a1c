//! Property-list encoding/decoding for configuration profiles.
//!
//! Profiles are read from XML or binary property lists and written as XML
//! by default (binary on request).

pub mod document;
pub mod multi_string;
pub mod payload;
pub mod primitives;
pub mod profile;

pub use document::{
    EncodeOptions, Format, decode_profile, decode_value, encode_profile,
    encode_profile_with_options, encode_value, parse_document, write_document,
};
pub use payload::decode_payload_body;
pub use primitives::{Decode, DictReader, DictWriter, Encode, Reader};
