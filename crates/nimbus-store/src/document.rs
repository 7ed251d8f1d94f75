//! Document store contract — folder metadata.

use std::fmt;

use async_trait::async_trait;

use nimbus_core::result::AppResult;
use nimbus_core::types::{FolderId, UserId};
use nimbus_entity::Folder;

use crate::subscription::{SnapshotHandler, Subscription};

/// The document store holding folder records.
///
/// Point lookups and one-shot listings are async; live subscriptions are
/// registered synchronously and resolve by invoking their handler with
/// full snapshots (see [`SnapshotHandler`]). Snapshot ordering follows
/// creation time.
#[async_trait]
pub trait DocumentStore: Send + Sync + fmt::Debug + 'static {
    /// Fetch one folder by ID. `Ok(None)` when the document is missing.
    async fn folder_by_id(&self, id: FolderId) -> AppResult<Option<Folder>>;

    /// List folders with the given parent, owned by the given user,
    /// ordered by creation time.
    async fn folders_by_parent(
        &self,
        parent_id: Option<FolderId>,
        owner_id: UserId,
    ) -> AppResult<Vec<Folder>>;

    /// Persist a new folder record and return it (with its assigned ID
    /// and creation timestamp).
    async fn create_folder(&self, folder: Folder) -> AppResult<Folder>;

    /// Rename an existing folder.
    async fn rename_folder(&self, id: FolderId, name: &str) -> AppResult<Folder>;

    /// Delete a folder record. Returns `true` if a record was removed.
    async fn delete_folder(&self, id: FolderId) -> AppResult<bool>;

    /// Subscribe to the children of `parent_id` owned by `owner_id`.
    ///
    /// The handler receives the current result set immediately, then a
    /// fresh snapshot after every matching mutation, until the returned
    /// [`Subscription`] is dropped or unsubscribed.
    fn subscribe_children(
        &self,
        parent_id: Option<FolderId>,
        owner_id: UserId,
        handler: SnapshotHandler<Folder>,
    ) -> Subscription;
}
