//! Metadata lookup errors
//!
//! A lookup failure carries a human-readable message, the raw response
//! payload when one was received, and the underlying transport or parse
//! failure when there was one.

use std::error::Error as StdError;

use thiserror::Error;

use crate::observability::Severity;

/// Boxed cause of a lookup failure
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Result type for lookup operations
pub type LookupResult<T> = Result<T, LookupError>;

#[derive(Debug, Error)]
#[error("{message}")]
pub struct LookupError {
    message: String,
    payload: Option<String>,
    #[source]
    source: Option<BoxError>,
}

impl LookupError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            payload: None,
            source: None,
        }
    }

    /// Attaches the raw response that could not be used.
    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn code(&self) -> &'static str {
        "SHELF_LOOKUP_FAILED"
    }

    /// Lookups are advisory; a failure never touches the catalog.
    pub fn severity(&self) -> Severity {
        Severity::Warn
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io;

    #[test]
    fn test_display_is_message_only() {
        let err = LookupError::new("Google returned an invalid response").with_payload("<html>");
        assert_eq!(err.to_string(), "Google returned an invalid response");
        assert_eq!(err.payload(), Some("<html>"));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_source_chained() {
        let err = LookupError::new("Could not connect")
            .with_source(io::Error::new(io::ErrorKind::TimedOut, "timed out"));
        assert_eq!(err.source().unwrap().to_string(), "timed out");
        assert_eq!(err.code(), "SHELF_LOOKUP_FAILED");
    }
}
