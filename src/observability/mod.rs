//! Observability for document stores
//!
//! - Structured JSON logging with typed events
//! - Monotonic per-store counters
//!
//! Observability never changes the outcome of an operation.
//!
//! # Usage
//!
//! ```ignore
//! use docindex::observability::{log_event_with_fields, Event, Logger, Severity};
//!
//! Logger::set_min_severity(Some(Severity::Trace));
//! log_event_with_fields(Event::DocumentAdded, &[("id", "7")]);
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity, LOG_ENV_VAR};
pub use metrics::{MetricsSnapshot, StoreMetrics};

/// Log a typed event at its own severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a typed event with fields at its own severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
