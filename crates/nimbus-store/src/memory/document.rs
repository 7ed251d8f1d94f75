//! In-memory document store.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tracing::debug;

use nimbus_core::error::AppError;
use nimbus_core::result::AppResult;
use nimbus_core::types::{FolderId, UserId};
use nimbus_entity::Folder;

use crate::document::DocumentStore;
use crate::subscription::{SnapshotHandler, Subscription};

/// A children-listener registration.
struct ChildWatcher {
    parent_id: Option<FolderId>,
    owner_id: UserId,
    handler: SnapshotHandler<Folder>,
}

struct Inner {
    /// Folder ID → folder record.
    folders: DashMap<FolderId, Folder>,
    /// Watcher ID → registration.
    watchers: DashMap<u64, ChildWatcher>,
    /// Watcher ID source.
    next_watcher: AtomicU64,
}

impl Inner {
    /// Materialize the snapshot a watcher filter sees, ordered by
    /// creation time.
    fn snapshot(&self, parent_id: Option<FolderId>, owner_id: UserId) -> Vec<Folder> {
        let mut folders: Vec<Folder> = self
            .folders
            .iter()
            .filter(|entry| {
                entry.parent_id == parent_id && entry.owner_id == Some(owner_id)
            })
            .map(|entry| entry.value().clone())
            .collect();
        folders.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.name.cmp(&b.name))
        });
        folders
    }

    /// Deliver fresh snapshots to every watcher of `parent_id`.
    fn notify(&self, parent_id: Option<FolderId>) {
        // Collect first so no map guard is held while handlers run.
        let pending: Vec<(SnapshotHandler<Folder>, Vec<Folder>)> = self
            .watchers
            .iter()
            .filter(|entry| entry.parent_id == parent_id)
            .map(|entry| {
                (
                    Arc::clone(&entry.handler),
                    self.snapshot(entry.parent_id, entry.owner_id),
                )
            })
            .collect();

        for (handler, snapshot) in pending {
            handler(snapshot);
        }
    }
}

/// In-memory [`DocumentStore`].
///
/// Every mutation synchronously re-materializes and delivers snapshots
/// to the matching children listeners, which makes subscription ordering
/// deterministic in tests.
#[derive(Clone)]
pub struct MemoryDocumentStore {
    inner: Arc<Inner>,
}

impl MemoryDocumentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                folders: DashMap::new(),
                watchers: DashMap::new(),
                next_watcher: AtomicU64::new(0),
            }),
        }
    }

    /// Number of folder records currently stored.
    pub fn folder_count(&self) -> usize {
        self.inner.folders.len()
    }
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryDocumentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryDocumentStore")
            .field("folders", &self.inner.folders.len())
            .field("watchers", &self.inner.watchers.len())
            .finish()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn folder_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        Ok(self.inner.folders.get(&id).map(|entry| entry.clone()))
    }

    async fn folders_by_parent(
        &self,
        parent_id: Option<FolderId>,
        owner_id: UserId,
    ) -> AppResult<Vec<Folder>> {
        Ok(self.inner.snapshot(parent_id, owner_id))
    }

    async fn create_folder(&self, mut folder: Folder) -> AppResult<Folder> {
        let id = folder.id.unwrap_or_else(FolderId::new);
        folder.id = Some(id);
        if folder.created_at.is_none() {
            folder.created_at = Some(Utc::now());
        }
        if self.inner.folders.contains_key(&id) {
            return Err(AppError::conflict(format!("Folder {id} already exists")));
        }
        self.inner.folders.insert(id, folder.clone());
        debug!(folder_id = %id, name = %folder.name, "Folder document created");
        self.inner.notify(folder.parent_id);
        Ok(folder)
    }

    async fn rename_folder(&self, id: FolderId, name: &str) -> AppResult<Folder> {
        let renamed = {
            let mut entry = self
                .inner
                .folders
                .get_mut(&id)
                .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
            entry.name = name.to_string();
            entry.clone()
        };
        self.inner.notify(renamed.parent_id);
        Ok(renamed)
    }

    async fn delete_folder(&self, id: FolderId) -> AppResult<bool> {
        match self.inner.folders.remove(&id) {
            Some((_, folder)) => {
                debug!(folder_id = %id, "Folder document deleted");
                self.inner.notify(folder.parent_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn subscribe_children(
        &self,
        parent_id: Option<FolderId>,
        owner_id: UserId,
        handler: SnapshotHandler<Folder>,
    ) -> Subscription {
        let id = self.inner.next_watcher.fetch_add(1, Ordering::Relaxed);
        self.inner.watchers.insert(
            id,
            ChildWatcher {
                parent_id,
                owner_id,
                handler: Arc::clone(&handler),
            },
        );

        // Listeners see the current result set right away.
        handler(self.inner.snapshot(parent_id, owner_id));

        let inner = Arc::clone(&self.inner);
        Subscription::new(move || {
            inner.watchers.remove(&id);
        })
    }
}
