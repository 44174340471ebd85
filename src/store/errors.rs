//! Store error types
//!
//! Error codes:
//! - SHELF_STORE_IO_ERROR (ERROR severity)
//! - SHELF_STORE_PARSE_ERROR (ERROR severity) - load aborted
//! - SHELF_STORE_STATE_ERROR (ERROR severity)
//! - catalog and record codes pass through unchanged

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::observability::Severity;
use crate::record::RecordError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be opened, read, written or synced
    #[error("I/O error on {}: {message}", .path.display())]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: io::Error,
    },

    /// A stored row could not be decoded into a record
    #[error("Parse error at {}:{line}: {reason}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
        #[source]
        source: Option<RecordError>,
    },

    /// The operation is not valid for the store's current mode
    #[error("Invalid store state: {0}")]
    State(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Record(#[from] RecordError),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, message: impl Into<String>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            message: message.into(),
            source,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, line: usize, reason: impl Into<String>) -> Self {
        StoreError::Parse {
            path: path.into(),
            line,
            reason: reason.into(),
            source: None,
        }
    }

    pub(crate) fn invalid_row(path: impl Into<PathBuf>, line: usize, source: RecordError) -> Self {
        StoreError::Parse {
            path: path.into(),
            line,
            reason: source.to_string(),
            source: Some(source),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Io { .. } => "SHELF_STORE_IO_ERROR",
            StoreError::Parse { .. } => "SHELF_STORE_PARSE_ERROR",
            StoreError::State(_) => "SHELF_STORE_STATE_ERROR",
            StoreError::Catalog(e) => e.code(),
            StoreError::Record(e) => e.code(),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            StoreError::Catalog(e) => e.severity(),
            StoreError::Record(e) => e.severity(),
            _ => Severity::Error,
        }
    }

    /// Whether the record being removed or indexed was absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Catalog(CatalogError::NotFound(_)))
    }
}
