//! Key/value blob store contract — file payloads.

use std::fmt;

use async_trait::async_trait;

use nimbus_core::result::AppResult;
use nimbus_core::types::UserId;
use nimbus_entity::File;

use crate::subscription::{SnapshotHandler, Subscription};

/// The key/value store holding file records.
///
/// Files are keyed by `files/{user}/{file.path}`; a *scope* is a key
/// prefix such as `files/{user}` (root) or `files/{user}/{folder}`
/// (see [`nimbus_entity::folder_scope_path`]). Listings and
/// subscriptions operate on scopes.
#[async_trait]
pub trait BlobStore: Send + Sync + fmt::Debug + 'static {
    /// Fetch one file by its storage path within a user scope.
    async fn file_at(&self, user_id: UserId, path: &str) -> AppResult<Option<File>>;

    /// List every file under a scope prefix, ordered by creation time.
    async fn files_under(&self, scope: &str) -> AppResult<Vec<File>>;

    /// Store a new file record at its storage path.
    async fn put_file(&self, user_id: UserId, file: File) -> AppResult<File>;

    /// Replace the name and content of the file at `path`.
    async fn update_file(
        &self,
        user_id: UserId,
        path: &str,
        name: &str,
        content: &str,
    ) -> AppResult<File>;

    /// Delete the file at `path`. Returns `true` if a record was removed.
    async fn delete_file(&self, user_id: UserId, path: &str) -> AppResult<bool>;

    /// Subscribe to every file under a scope prefix.
    ///
    /// The handler receives the current result set immediately, then a
    /// fresh snapshot after every mutation under the scope, until the
    /// returned [`Subscription`] is dropped or unsubscribed.
    fn subscribe_scope(&self, scope: &str, handler: SnapshotHandler<File>) -> Subscription;
}
