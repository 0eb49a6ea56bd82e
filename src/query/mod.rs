//! Search over a document store
//!
//! Options select fields, tags, the join mode and the response projection.
//! Results are composed from per-field index searches and tag buckets.

mod composer;
mod options;
mod result;

pub use options::{FieldSelection, JoinMode, OneOrMany, SearchOptions, DEFAULT_LIMIT};
pub use result::{EnrichedDoc, FieldResult, Hits, SearchResponse, TagResult};
