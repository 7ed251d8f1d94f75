//! # nimbus-entity
//!
//! Domain entity models for Nimbus. Every struct in this crate is a value
//! object: folders and files as delivered by the backing stores, the path
//! segments that link them, and the pure classification helpers derived
//! from them. All entities derive `Debug`, `Clone`, `Serialize`, and
//! `Deserialize`.

pub mod file;
pub mod folder;
pub mod path;

pub use file::{File, FileKind};
pub use folder::{Folder, PathSegment};
pub use path::{file_storage_path, folder_scope_path, sanitize_file_name};
