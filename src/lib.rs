//! docindex - multi-field document orchestration over single-field indexes
//!
//! Maps nested JSON records onto one inverted index per declared field,
//! keeps tag facets and stored records in step, and composes per-field and
//! per-tag results into one answer.

pub mod cache;
pub mod cli;
pub mod document;
pub mod facet;
pub mod field;
pub mod observability;
pub mod path;
pub mod projector;
pub mod query;
pub mod queue;

pub use document::{DocId, DocumentConfig, DocumentError, DocumentResult, DocumentStore};
pub use field::{FieldIndex, TokenIndex};
pub use query::{SearchOptions, SearchResponse};
pub use queue::QueuedDocumentStore;
