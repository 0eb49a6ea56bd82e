//! Observable events of the document layer

use std::fmt;

/// Events emitted by document stores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Store constructed from a configuration
    StoreCreated,
    /// Configuration rejected at construction
    ConfigRejected,
    /// Operation requested without the capability configured
    CapabilityMissing,

    // Writes
    /// New entry created
    DocumentAdded,
    /// Existing entry extended
    DocumentAppended,
    /// Entry replaced
    DocumentUpdated,
    /// Entry removed
    DocumentRemoved,
    /// Remove of an unknown id ignored
    RemoveSkipped,
    /// Add ignored (no content or no usable id)
    AddSkipped,
    /// Partial add rolled back after a field index failure
    AddRolledBack,

    // Reads
    /// Search finished
    SearchExecuted,
    /// Tag-only search answered from buckets
    TagFastPath,
    /// AND search voided by an empty field
    AndShortCircuit,
    /// Search answered from cache
    CacheHit,
    /// Search not found in cache
    CacheMiss,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::StoreCreated => "STORE_CREATED",
            Event::ConfigRejected => "CONFIG_REJECTED",
            Event::CapabilityMissing => "CAPABILITY_MISSING",

            Event::DocumentAdded => "DOCUMENT_ADDED",
            Event::DocumentAppended => "DOCUMENT_APPENDED",
            Event::DocumentUpdated => "DOCUMENT_UPDATED",
            Event::DocumentRemoved => "DOCUMENT_REMOVED",
            Event::RemoveSkipped => "REMOVE_SKIPPED",
            Event::AddSkipped => "ADD_SKIPPED",
            Event::AddRolledBack => "ADD_ROLLED_BACK",

            Event::SearchExecuted => "SEARCH_COMPLETE",
            Event::TagFastPath => "SEARCH_TAG_FAST_PATH",
            Event::AndShortCircuit => "SEARCH_AND_SHORT_CIRCUIT",
            Event::CacheHit => "CACHE_HIT",
            Event::CacheMiss => "CACHE_MISS",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> super::Severity {
        use super::Severity;

        match self {
            Event::StoreCreated => Severity::Info,
            Event::ConfigRejected | Event::CapabilityMissing => Severity::Warn,
            Event::AddRolledBack => Severity::Error,
            _ => Severity::Trace,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::Severity;

    #[test]
    fn test_all_events_have_string_representation() {
        let events = [
            Event::StoreCreated,
            Event::ConfigRejected,
            Event::CapabilityMissing,
            Event::DocumentAdded,
            Event::DocumentAppended,
            Event::DocumentUpdated,
            Event::DocumentRemoved,
            Event::RemoveSkipped,
            Event::AddSkipped,
            Event::AddRolledBack,
            Event::SearchExecuted,
            Event::TagFastPath,
            Event::AndShortCircuit,
            Event::CacheHit,
            Event::CacheMiss,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_event_severity() {
        assert_eq!(Event::StoreCreated.severity(), Severity::Info);
        assert_eq!(Event::ConfigRejected.severity(), Severity::Warn);
        assert_eq!(Event::AddRolledBack.severity(), Severity::Error);
        assert_eq!(Event::DocumentAdded.severity(), Severity::Trace);
    }

    #[test]
    fn test_event_display() {
        assert_eq!(format!("{}", Event::TagFastPath), "SEARCH_TAG_FAST_PATH");
    }
}
