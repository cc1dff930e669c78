//! Decoding errors.

use std::fmt;

/// Kind of a [`DecodeError`].
#[derive(Debug)]
#[non_exhaustive]
pub enum DecodeErrorKind {
    /// Input is not valid JSON.
    Syntax(serde_json::Error),
    /// JSON value has an unexpected type.
    InvalidType {
        /// Human-readable description of the expected type.
        expected: String,
        /// JSON type of the actual value.
        actual: &'static str,
    },
    /// Integer doesn't fit into the target type.
    OutOfRange {
        /// Textual representation of the number.
        number: String,
        /// Target type.
        expected: String,
    },
    /// Array has an unexpected number of elements.
    InvalidLength {
        /// Expected number of elements.
        expected: usize,
        /// Actual number of elements.
        actual: usize,
    },
    /// Map key cannot be decoded into the key type.
    InvalidKey {
        /// Raw key.
        key: String,
        /// Key type.
        expected: String,
    },
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(err) => write!(formatter, "invalid JSON: {err}"),
            Self::InvalidType { expected, actual } => {
                write!(formatter, "invalid type: {actual}, expected {expected}")
            }
            Self::OutOfRange { number, expected } => {
                write!(formatter, "number {number} is out of range for `{expected}`")
            }
            Self::InvalidLength { expected, actual } => write!(
                formatter,
                "invalid length {actual}, expected an array with {expected} element(s)"
            ),
            Self::InvalidKey { key, expected } => {
                write!(formatter, "cannot decode map key {key:?} as `{expected}`")
            }
        }
    }
}

/// Error decoding input into a value of a synthesized type.
#[derive(Debug)]
pub struct DecodeError {
    kind: DecodeErrorKind,
    path: String,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            fmt::Display::fmt(&self.kind, formatter)
        } else {
            write!(formatter, "error at `{}`: {}", self.path, self.kind)
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            DecodeErrorKind::Syntax(err) => Some(err),
            _ => None,
        }
    }
}

impl DecodeError {
    pub(crate) fn new(kind: DecodeErrorKind, path: &str) -> Self {
        Self {
            kind,
            path: path.to_owned(),
        }
    }

    pub(crate) fn syntax(err: serde_json::Error) -> Self {
        Self::new(DecodeErrorKind::Syntax(err), "")
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }

    /// Returns a dot-separated path to the erroneous value, e.g. `items.0.name`. The path is empty
    /// if the error relates to the root value.
    pub fn path(&self) -> &str {
        &self.path
    }
}
