//! Error types for profile decoding and encoding.

use thiserror::Error;

/// Error during profile decoding.
///
/// Every variant is terminal: decoding stops at the first error and no
/// partial document is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// The property-list engine rejected the input bytes.
    #[error("malformed property list: {0}")]
    Plist(String),

    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("missing required key {field:?}")]
    MissingField { field: &'static str },

    /// A value had the wrong shape for the type it was decoded into.
    ///
    /// `found` describes the offending value (e.g. `integer 42`), `target`
    /// names the type that was being decoded.
    #[error("cannot decode {found} into value of type {target}")]
    UnexpectedType { found: String, target: &'static str },

    #[error("integer {value} does not fit into a signed 64-bit integer")]
    IntegerOutOfRange { value: u64 },

    /// A composite decode failed for a reason that carries no type
    /// information of its own.
    #[error("cannot decode value into {target}: {source}")]
    Invalid {
        target: &'static str,
        source: Box<DecodeError>,
    },

    /// An error raised below a dictionary key or array index.
    #[error("{path}: {source}")]
    InField {
        path: String,
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    /// Attaches a path segment (a dictionary key or an `[index]`) to the
    /// error. Segments are prepended, so the outermost caller ends up first.
    pub fn in_field(self, segment: impl Into<String>) -> Self {
        let segment = segment.into();
        match self {
            DecodeError::InField { path, source } => DecodeError::InField {
                path: join_path(&segment, &path),
                source,
            },
            other => DecodeError::InField {
                path: segment,
                source: Box::new(other),
            },
        }
    }

    /// Returns the field path the error was raised under, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            DecodeError::InField { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Returns the error with its field path stripped.
    pub fn without_context(&self) -> &DecodeError {
        match self {
            DecodeError::InField { source, .. } => source,
            other => other,
        }
    }

    /// Re-labels a type mismatch with a different target type name.
    ///
    /// Used by composite types that probe several primitive shapes: the
    /// caller should see the composite's own name, not the name of the last
    /// shape that was tried. A mismatch raised below a key or index is
    /// re-labelled in place and keeps its path. Errors without type
    /// information are wrapped in [`DecodeError::Invalid`] instead.
    pub fn retarget(self, target: &'static str) -> Self {
        match self {
            DecodeError::UnexpectedType { found, .. } => {
                DecodeError::UnexpectedType { found, target }
            }
            DecodeError::InField { path, source } if source.is_type_mismatch() => {
                DecodeError::InField {
                    path,
                    source: Box::new(source.retarget(target)),
                }
            }
            other => DecodeError::Invalid {
                target,
                source: Box::new(other),
            },
        }
    }

    /// Returns true if the error is a type mismatch, under any path.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(
            self.without_context(),
            DecodeError::UnexpectedType { .. }
        )
    }
}

/// Error during profile encoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    /// A value that has no valid encoding when empty was empty.
    #[error("cannot encode empty {type_name}")]
    EmptyValue { type_name: &'static str },

    #[error("{path}: {source}")]
    InField {
        path: String,
        source: Box<EncodeError>,
    },

    /// The property-list engine failed to write the document.
    #[error("property list serialization failed: {0}")]
    Plist(String),
}

impl EncodeError {
    /// Attaches a path segment to the error; see [`DecodeError::in_field`].
    pub fn in_field(self, segment: impl Into<String>) -> Self {
        let segment = segment.into();
        match self {
            EncodeError::InField { path, source } => EncodeError::InField {
                path: join_path(&segment, &path),
                source,
            },
            other => EncodeError::InField {
                path: segment,
                source: Box::new(other),
            },
        }
    }

    /// Returns the error with its field path stripped.
    pub fn without_context(&self) -> &EncodeError {
        match self {
            EncodeError::InField { source, .. } => source,
            other => other,
        }
    }
}

fn join_path(segment: &str, rest: &str) -> String {
    if rest.starts_with('[') {
        format!("{segment}{rest}")
    } else {
        format!("{segment}.{rest}")
    }
}
