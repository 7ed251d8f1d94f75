//! In-memory key/value blob store.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tracing::debug;

use nimbus_core::error::AppError;
use nimbus_core::result::AppResult;
use nimbus_core::types::UserId;
use nimbus_entity::File;

use crate::blob::BlobStore;
use crate::subscription::{SnapshotHandler, Subscription};

/// A scope-listener registration.
struct ScopeWatcher {
    scope: String,
    handler: SnapshotHandler<File>,
}

struct Inner {
    /// Full storage key (`files/{user}/{path}`) → file record.
    files: DashMap<String, File>,
    /// Watcher ID → registration.
    watchers: DashMap<u64, ScopeWatcher>,
    /// Watcher ID source.
    next_watcher: AtomicU64,
}

/// Whether `key` sits under the scope prefix.
fn in_scope(scope: &str, key: &str) -> bool {
    key.strip_prefix(scope)
        .is_some_and(|rest| rest.starts_with('/'))
}

impl Inner {
    fn snapshot(&self, scope: &str) -> Vec<File> {
        let mut files: Vec<File> = self
            .files
            .iter()
            .filter(|entry| in_scope(scope, entry.key()))
            .map(|entry| entry.value().clone())
            .collect();
        files.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.name.cmp(&b.name))
        });
        files
    }

    /// Deliver fresh snapshots to every watcher whose scope covers `key`.
    fn notify(&self, key: &str) {
        let pending: Vec<(SnapshotHandler<File>, Vec<File>)> = self
            .watchers
            .iter()
            .filter(|entry| in_scope(&entry.scope, key))
            .map(|entry| (Arc::clone(&entry.handler), self.snapshot(&entry.scope)))
            .collect();

        for (handler, snapshot) in pending {
            handler(snapshot);
        }
    }
}

/// Storage key for a file path within a user scope.
fn storage_key(user_id: UserId, path: &str) -> String {
    format!("files/{user_id}/{path}")
}

/// In-memory [`BlobStore`].
#[derive(Clone)]
pub struct MemoryBlobStore {
    inner: Arc<Inner>,
}

impl MemoryBlobStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                files: DashMap::new(),
                watchers: DashMap::new(),
                next_watcher: AtomicU64::new(0),
            }),
        }
    }

    /// Number of file records currently stored.
    pub fn file_count(&self) -> usize {
        self.inner.files.len()
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryBlobStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryBlobStore")
            .field("files", &self.inner.files.len())
            .field("watchers", &self.inner.watchers.len())
            .finish()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn file_at(&self, user_id: UserId, path: &str) -> AppResult<Option<File>> {
        let key = storage_key(user_id, path);
        Ok(self.inner.files.get(&key).map(|entry| entry.clone()))
    }

    async fn files_under(&self, scope: &str) -> AppResult<Vec<File>> {
        Ok(self.inner.snapshot(scope))
    }

    async fn put_file(&self, user_id: UserId, mut file: File) -> AppResult<File> {
        if file.created_at.is_none() {
            file.created_at = Some(Utc::now());
        }
        let key = storage_key(user_id, &file.path);
        self.inner.files.insert(key.clone(), file.clone());
        debug!(key = %key, name = %file.name, "File blob stored");
        self.inner.notify(&key);
        Ok(file)
    }

    async fn update_file(
        &self,
        user_id: UserId,
        path: &str,
        name: &str,
        content: &str,
    ) -> AppResult<File> {
        let key = storage_key(user_id, path);
        let updated = {
            let mut entry = self
                .inner
                .files
                .get_mut(&key)
                .ok_or_else(|| AppError::not_found(format!("No file at {path}")))?;
            entry.name = name.trim().to_string();
            entry.content = content.to_string();
            entry.clone()
        };
        self.inner.notify(&key);
        Ok(updated)
    }

    async fn delete_file(&self, user_id: UserId, path: &str) -> AppResult<bool> {
        let key = storage_key(user_id, path);
        match self.inner.files.remove(&key) {
            Some(_) => {
                debug!(key = %key, "File blob deleted");
                self.inner.notify(&key);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn subscribe_scope(&self, scope: &str, handler: SnapshotHandler<File>) -> Subscription {
        let id = self.inner.next_watcher.fetch_add(1, Ordering::Relaxed);
        self.inner.watchers.insert(
            id,
            ScopeWatcher {
                scope: scope.to_string(),
                handler: Arc::clone(&handler),
            },
        );

        handler(self.inner.snapshot(scope));

        let inner = Arc::clone(&self.inner);
        Subscription::new(move || {
            inner.watchers.remove(&id);
        })
    }
}
