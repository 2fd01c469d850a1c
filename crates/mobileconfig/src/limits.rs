//! Limits applied while decoding untrusted profiles.

/// Maximum accepted size of a serialized profile (16 MiB).
///
/// Signed and unsigned profiles in the wild are a few kilobytes; anything
/// near this bound is almost certainly not a configuration profile.
pub const MAX_DOCUMENT_SIZE: usize = 16 * 1024 * 1024;
