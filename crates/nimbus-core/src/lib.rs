//! # nimbus-core
//!
//! Core crate for Nimbus. Contains the unified error system, typed
//! identifiers, configuration schemas, the tracing bootstrap, the session
//! context, and the type-independent collaborator contracts (token
//! provider, content analyzer).
//!
//! This crate has **no** internal dependencies on other Nimbus crates.

pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
