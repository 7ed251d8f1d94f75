//! Type-independent collaborator contracts.
//!
//! Contracts that reference domain entities live next to the code that
//! owns those entities (`nimbus-store`, `nimbus-catalog`); the traits
//! here are free of any domain types.

pub mod analyze;
pub mod token;

pub use analyze::{AnalyzeRequest, AnalyzeResponse, ContentAnalyzer};
pub use token::TokenProvider;
