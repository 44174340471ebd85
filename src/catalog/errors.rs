//! Catalog error types

use thiserror::Error;

use crate::observability::Severity;
use crate::record::RecordIdentity;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog failures.
///
/// `NotFound` is an expected outcome of removing or indexing a record the
/// catalog does not hold, not a bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Record not in catalog: {}", describe(.0))]
    NotFound(RecordIdentity),
}

fn describe(identity: &RecordIdentity) -> String {
    match identity {
        RecordIdentity::Isbn(isbn) => format!("ISBN {}", isbn),
        RecordIdentity::AuthorTitle { author, title } => format!("'{}' by {}", title, author),
    }
}

impl CatalogError {
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::NotFound(_) => "SHELF_RECORD_NOT_FOUND",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            CatalogError::NotFound(_) => Severity::Warn,
        }
    }
}
