//! Document orchestration layer
//!
//! Maps semi-structured records onto one field index per declared field,
//! maintains tag facets and stored records, and keeps all of them consistent
//! per id.
//!
//! # Invariants
//!
//! - An id is present iff the register holds an entry for it
//! - Field, tag and store membership of an id change together
//! - Compiled paths come from configuration only

mod config;
mod errors;
mod id;
mod records;
mod store;

pub use config::{
    Capabilities, Capability, CacheOption, DocumentConfig, FieldDescriptor, FieldOptions,
    FieldSetting, StoreMode, StoreOption, DEFAULT_CACHE_CAPACITY, DEFAULT_KEY,
};
pub use errors::{DocumentError, DocumentErrorCode, DocumentResult};
pub use id::DocId;
pub use records::RecordStore;
pub use store::DocumentStore;
