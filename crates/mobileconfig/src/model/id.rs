//! Payload UUIDs.
//!
//! Profiles identify every payload by a `PayloadUUID` string. Apple tooling
//! writes them as upper-case hyphenated RFC 4122 UUIDs, but hand-edited
//! profiles frequently use lower case, so comparisons go through
//! [`parse_payload_uuid`].

use uuid::Uuid;

/// Generates a fresh random (v4) payload UUID in canonical upper-case form.
pub fn new_payload_uuid() -> String {
    format_payload_uuid(&Uuid::new_v4())
}

/// Formats a UUID as upper-case hyphenated text.
pub fn format_payload_uuid(id: &Uuid) -> String {
    id.hyphenated().to_string().to_uppercase()
}

/// Parses a payload UUID (any case, with or without hyphens).
pub fn parse_payload_uuid(s: &str) -> Option<Uuid> {
    Uuid::parse_str(s.trim()).ok()
}

/// Returns true if two payload UUID strings name the same UUID.
///
/// Strings that do not parse are compared verbatim.
pub fn same_payload_uuid(a: &str, b: &str) -> bool {
    match (parse_payload_uuid(a), parse_payload_uuid(b)) {
        (Some(a), Some(b)) => a == b,
        _ => a == b,
    }
}
