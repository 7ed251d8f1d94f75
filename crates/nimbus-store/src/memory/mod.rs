//! In-memory reference stores with live snapshot delivery.

pub mod blob;
pub mod document;

pub use blob::MemoryBlobStore;
pub use document::MemoryDocumentStore;
