//! Observability for bookshelf
//!
//! Structured one-line JSON logging of store lifecycle events.
//! Observability is read-only: a failed log write never changes the
//! outcome of the operation being logged.
//!
//! ```ignore
//! use bookshelf::observability::{log_event_with_fields, Event, Logger, Severity};
//!
//! Logger::set_min_severity(Severity::Info);
//! log_event_with_fields(Event::CatalogLoaded, &[("records", "42")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Logs an event at its default severity.
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Logs an event with fields at its default severity.
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        // Verifies no panic
        log_event(Event::StoreOpened);
        log_event_with_fields(Event::CatalogLoaded, &[("records", "0")]);
    }
}
