//! # nimbus-query
//!
//! The search grammar for folder/file listings: one free-text string is
//! parsed into up to three ANDed predicates (tag, type, name remainder),
//! and the remainder drives live highlighting of candidate names.
//!
//! Everything here is pure; queries can be parsed and evaluated
//! repeatedly and concurrently without synchronization.

pub mod candidate;
pub mod highlight;
pub mod search;

pub use candidate::Candidate;
pub use highlight::Segment;
pub use search::{Evaluation, SearchQuery, evaluate};
