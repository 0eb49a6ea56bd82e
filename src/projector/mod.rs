//! Field projection over nested documents
//!
//! Walks a document along a compiled path. Two consumers share the same
//! traversal:
//!
//! - Indexing: resolved leaf values are fed to a field index
//! - Store extraction: the traversed shape is mirrored into a stored subset
//!
//! # Traversal rules
//!
//! - An array met before the final depth fans out without advancing the depth
//!   (an array level is not a path segment)
//! - An object met before the final depth descends into the next segment
//! - Absent, null or scalar intermediate values end the branch silently
//! - Traversal is stack based and visits elements in document order

mod resolve;
mod store;
mod walk;

pub use resolve::{resolve, scalar_text};
pub use store::{project_into_store, project_paths};
pub use walk::{collect_index_units, project_into_index, IndexUnit, MAX_ARRAY_NESTING};
