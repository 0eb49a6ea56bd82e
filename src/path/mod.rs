//! Path compilation for document field, tag, key and store paths
//!
//! A declarative path such as `contents[]:body` is compiled once, at
//! construction time, into an ordered list of segments. Each segment carries
//! an array-flatten marker taken from the `[]` suffix.
//!
//! # Invariants
//!
//! - Compiled paths are derived from configuration only, never from documents
//! - A compiled path is immutable after construction
//! - Suffix-only segments (`[]`) are dropped and do not count as a depth level

mod compiler;

pub use compiler::{CompiledPath, Segment, FLATTEN_SUFFIX, SEGMENT_DELIMITER};
