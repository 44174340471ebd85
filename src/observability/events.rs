//! Observable store and catalog events

use std::fmt;

use super::logger::Severity;

/// Events emitted by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Configuration file read and validated
    ConfigLoaded,
    /// Backing file opened
    StoreOpened,
    /// First row recognized as the column header
    HeaderDetected,
    /// Header row written to an empty file
    HeaderWritten,
    /// Initial load or reload finished
    CatalogLoaded,
    /// A row could not be turned into a record; load aborted
    LoadFailed,
    /// One row appended for an inserted record
    RecordAppended,
    /// Record dropped from the in-memory catalog
    RecordRemoved,
    /// Removal requested for a record the catalog does not hold
    RecordMissing,
    /// Buffered rows flushed and synced
    Committed,
    /// Backing file released
    StoreClosed,
    /// Flush during drop failed
    CloseFailed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreOpened => "STORE_OPENED",
            Event::HeaderDetected => "HEADER_DETECTED",
            Event::HeaderWritten => "HEADER_WRITTEN",
            Event::CatalogLoaded => "CATALOG_LOADED",
            Event::LoadFailed => "LOAD_FAILED",
            Event::RecordAppended => "RECORD_APPENDED",
            Event::RecordRemoved => "RECORD_REMOVED",
            Event::RecordMissing => "RECORD_MISSING",
            Event::Committed => "STORE_COMMITTED",
            Event::StoreClosed => "STORE_CLOSED",
            Event::CloseFailed => "STORE_CLOSE_FAILED",
        }
    }

    /// Default severity for this event
    pub fn severity(&self) -> Severity {
        match self {
            Event::RecordAppended | Event::RecordRemoved | Event::HeaderDetected => {
                Severity::Trace
            }
            Event::RecordMissing => Severity::Warn,
            Event::LoadFailed | Event::CloseFailed => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
