//! Tag facets and the fastupdate back-reference register
//!
//! Tag buckets are owned by an arena and addressed by slot. The register maps
//! each present id to the slots of the buckets it was inserted into, so
//! removal touches only those buckets.
//!
//! # Invariants
//!
//! - A bucket never holds the same id twice
//! - Bucket order is first-add order
//! - Empty buckets are deleted

mod arena;
mod register;
mod tags;

pub use arena::{Bucket, BucketArena, SlotId, Splice};
pub use register::Register;
pub use tags::TagFacets;
