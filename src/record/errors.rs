//! Record errors
//!
//! Identifier variants belong to the VALIDATION class. `FieldCount` is
//! raised while building a record from a stored row; the store reports
//! it, like any failure during load, as a parse error.

use thiserror::Error;

use crate::observability::Severity;

/// Result type for record operations
pub type RecordResult<T> = Result<T, RecordError>;

/// Identifier validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Wrong number of digits after stripping separators
    #[error("Invalid ISBN length: '{input}' has {digits} digits, expected 10 or 13")]
    InvalidLength { input: String, digits: usize },

    /// A character other than a digit, separator or trailing X
    #[error("Invalid character {found:?} in ISBN '{input}'")]
    InvalidCharacter { input: String, found: char },

    /// Check digit does not match the computed one
    #[error("ISBN checksum mismatch for '{input}'")]
    ChecksumMismatch { input: String },

    /// ISBN-13 not in the Bookland 978/979 range
    #[error("Invalid ISBN-13 prefix in '{input}': expected 978 or 979")]
    InvalidPrefix { input: String },

    /// Stored row too short or too long
    #[error("Row has {found} fields, expected 7 to 9")]
    FieldCount { found: usize },
}

impl RecordError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            RecordError::InvalidLength { .. } => "SHELF_ISBN_INVALID_LENGTH",
            RecordError::InvalidCharacter { .. } => "SHELF_ISBN_INVALID_CHARACTER",
            RecordError::ChecksumMismatch { .. } => "SHELF_ISBN_CHECKSUM_MISMATCH",
            RecordError::InvalidPrefix { .. } => "SHELF_ISBN_INVALID_PREFIX",
            RecordError::FieldCount { .. } => "SHELF_ROW_FIELD_COUNT",
        }
    }

    /// Validation failures never leave shared state behind.
    pub fn severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether the identifier itself was rejected
    pub fn is_validation(&self) -> bool {
        !matches!(self, RecordError::FieldCount { .. })
    }

    /// The raw identifier that failed validation
    pub fn input(&self) -> Option<&str> {
        match self {
            RecordError::InvalidLength { input, .. }
            | RecordError::InvalidCharacter { input, .. }
            | RecordError::ChecksumMismatch { input }
            | RecordError::InvalidPrefix { input } => Some(input),
            RecordError::FieldCount { .. } => None,
        }
    }
}
