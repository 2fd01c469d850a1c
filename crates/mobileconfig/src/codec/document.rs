//! Whole-document encoding/decoding.
//!
//! Input bytes may be XML or binary property lists; the format is detected
//! from the bytes. Output format is chosen through [`EncodeOptions`].

use std::io::Cursor;

use plist::Value;
use tracing::{debug, trace};

use crate::codec::primitives::{Decode, Encode, Reader};
use crate::error::{DecodeError, EncodeError};
use crate::limits::MAX_DOCUMENT_SIZE;
use crate::model::{PayloadKind, Profile};

// =============================================================================
// DECODING
// =============================================================================

/// Parses property-list bytes into a value tree.
pub fn parse_document(input: &[u8]) -> Result<Value, DecodeError> {
    if input.len() > MAX_DOCUMENT_SIZE {
        return Err(DecodeError::LengthExceedsLimit {
            field: "document",
            len: input.len(),
            max: MAX_DOCUMENT_SIZE,
        });
    }
    Value::from_reader(Cursor::new(input)).map_err(|e| DecodeError::Plist(e.to_string()))
}

/// Decodes any [`Decode`] type from property-list bytes.
pub fn decode_value<T: Decode>(input: &[u8]) -> Result<T, DecodeError> {
    let value = parse_document(input)?;
    Reader::new(&value).decode()
}

/// Decodes a configuration profile from XML or binary property-list bytes.
///
/// Payloads whose `PayloadType` has no dedicated shape are kept as
/// [`crate::model::PayloadValue::Unknown`] with only their common keys.
pub fn decode_profile(input: &[u8]) -> Result<Profile, DecodeError> {
    let profile: Profile = decode_value(input)?;

    for payload in &profile.payload_content {
        if payload.kind() == PayloadKind::Unknown {
            trace!(
                payload_type = %payload.payload_type(),
                identifier = %payload.common().identifier,
                "keeping common keys of unrecognized payload"
            );
        }
    }
    debug!(
        identifier = %profile.payload.identifier,
        payloads = profile.payload_content.len(),
        bytes = input.len(),
        "decoded profile"
    );

    Ok(profile)
}

// =============================================================================
// ENCODING
// =============================================================================

/// Property-list serialization format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// `<?xml ...?><plist version="1.0">` text, as written by most tooling.
    #[default]
    Xml,
    /// `bplist00` binary format.
    Binary,
}

/// Options for encoding documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeOptions {
    pub format: Format,
}

impl EncodeOptions {
    /// Creates default (XML) encoding options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates binary encoding options.
    pub fn binary() -> Self {
        Self {
            format: Format::Binary,
        }
    }
}

/// Serializes a value tree.
pub fn write_document(value: &Value, options: EncodeOptions) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    let written = match options.format {
        Format::Xml => value.to_writer_xml(&mut out),
        Format::Binary => value.to_writer_binary(&mut out),
    };
    written.map_err(|e| EncodeError::Plist(e.to_string()))?;
    Ok(out)
}

/// Encodes any [`Encode`] type to property-list bytes.
pub fn encode_value<T: Encode + ?Sized>(
    value: &T,
    options: EncodeOptions,
) -> Result<Vec<u8>, EncodeError> {
    write_document(&value.encode()?, options)
}

/// Encodes a configuration profile as an XML property list.
pub fn encode_profile(profile: &Profile) -> Result<Vec<u8>, EncodeError> {
    encode_profile_with_options(profile, EncodeOptions::default())
}

/// Encodes a configuration profile with the given options.
pub fn encode_profile_with_options(
    profile: &Profile,
    options: EncodeOptions,
) -> Result<Vec<u8>, EncodeError> {
    let out = encode_value(profile, options)?;
    debug!(
        identifier = %profile.payload.identifier,
        payloads = profile.payload_content.len(),
        format = ?options.format,
        bytes = out.len(),
        "encoded profile"
    );
    Ok(out)
}
