//! # nimbus-store
//!
//! Contracts for the two live backing stores the view is reconciled
//! from — the document store (folder metadata) and the key/value blob
//! store (file payloads) — plus in-memory reference implementations with
//! live snapshot delivery, used by the integration tests and single-node
//! embedding.

pub mod blob;
pub mod document;
pub mod memory;
pub mod subscription;

pub use blob::BlobStore;
pub use document::DocumentStore;
pub use memory::{MemoryBlobStore, MemoryDocumentStore};
pub use subscription::{SnapshotHandler, Subscription};
