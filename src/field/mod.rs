//! Field index contract and the built-in token index
//!
//! The document layer feeds one `FieldIndex` per declared field. This module
//! defines the contract, a token-based implementation, and the ordered set
//! routines used to merge field and tag results.

mod contract;
mod errors;
mod intersect;
mod token_index;
mod tokenizer;

pub use contract::{FieldIndex, FieldQuery};
pub use errors::{FieldIndexError, FieldIndexResult};
pub use intersect::{intersect, intersect_union};
pub use token_index::TokenIndex;
pub use tokenizer::{IndexOptions, TokenMode, Tokenizer};
