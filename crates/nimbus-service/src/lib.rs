//! # nimbus-service
//!
//! Business logic over the backing stores: folder CRUD with cascading
//! delete, file upload/update/delete, the opaque content-analysis
//! pass-through, and [`LocalCatalog`] — a [`nimbus_catalog::CatalogApi`]
//! served directly from the stores for tests and single-node embedding.

pub mod analyze;
pub mod catalog;
pub mod file;
pub mod folder;

pub use analyze::{AnalysisOutcome, AnalysisService};
pub use catalog::LocalCatalog;
pub use file::FileService;
pub use folder::FolderService;
