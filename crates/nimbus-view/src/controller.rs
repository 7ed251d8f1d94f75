//! The synchronization controller.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};

use nimbus_catalog::CatalogApi;
use nimbus_core::context::SessionContext;
use nimbus_core::types::FolderId;
use nimbus_entity::{File, Folder, folder_scope_path};
use nimbus_store::{BlobStore, DocumentStore, SnapshotHandler, Subscription};

use crate::state::{Action, Epoch};
use crate::store::ViewStore;

/// Owns the subscription lifecycle for the currently selected folder.
///
/// On every selection change or manual refresh the controller tears down
/// the previous epoch's subscriptions before establishing new ones, so at
/// most one subscription per source is live per `(folder, generation)`
/// pair. Results dispatch into the [`ViewStore`] through the epoch guard;
/// anything late from a superseded pair is discarded on arrival.
///
/// The live listeners and the one-shot catalog fetch deliberately write
/// the same state slices with no conflict merge: whichever resolves last
/// is authoritative until the next snapshot (last writer wins).
pub struct NavigationController {
    ctx: SessionContext,
    documents: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
    catalog: Arc<dyn CatalogApi>,
    store: Arc<ViewStore>,
    subscriptions: Mutex<Vec<Subscription>>,
}

impl NavigationController {
    /// Creates a controller for one mounted view.
    pub fn new(
        ctx: SessionContext,
        documents: Arc<dyn DocumentStore>,
        blobs: Arc<dyn BlobStore>,
        catalog: Arc<dyn CatalogApi>,
        store: Arc<ViewStore>,
    ) -> Self {
        Self {
            ctx,
            documents,
            blobs,
            catalog,
            store,
            subscriptions: Mutex::new(Vec::new()),
        }
    }

    /// The store this controller feeds.
    pub fn store(&self) -> &Arc<ViewStore> {
        &self.store
    }

    /// Navigate to a folder (`None` selects the root).
    ///
    /// Fire-and-forget: the selection is applied synchronously, lookups
    /// and fetches resolve by dispatching into the store.
    pub fn select(&self, folder_id: Option<FolderId>) {
        self.store.dispatch(Action::Select { folder_id });
        self.rewire();
    }

    /// Re-run every source for the current folder under a new
    /// generation. Existing data stays visible until superseded.
    pub fn refresh(&self) {
        self.store.dispatch(Action::Refresh);
        self.rewire();
    }

    /// Tear down the previous epoch's subscriptions and establish the
    /// current epoch's sources.
    fn rewire(&self) {
        // Teardown first: dropping the guards unregisters the listeners,
        // so no source can double-dispatch across the switch.
        self.subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();

        let epoch = self.store.epoch();
        let folder_id = epoch.folder_id;

        self.resolve_selected_folder(epoch, folder_id);

        let children_sub = self.subscribe_children(epoch, folder_id);
        let files_sub = self.subscribe_files(epoch, folder_id);
        {
            let mut subscriptions = self
                .subscriptions
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            subscriptions.push(children_sub);
            subscriptions.push(files_sub);
        }

        self.spawn_catalog_fetch(epoch, folder_id);
    }

    /// Resolve the selected folder record. The root resolves
    /// synchronously; lookups that miss or fail fall open to the root
    /// sentinel so the view is never left without a selected folder.
    fn resolve_selected_folder(&self, epoch: Epoch, folder_id: Option<FolderId>) {
        let Some(id) = folder_id else {
            self.store.dispatch_if(
                epoch,
                Action::FolderResolved {
                    folder: Folder::root(),
                },
            );
            return;
        };

        let documents = Arc::clone(&self.documents);
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            let folder = match documents.folder_by_id(id).await {
                Ok(Some(folder)) => folder,
                Ok(None) => {
                    debug!(folder_id = %id, "Folder lookup missed; falling back to root");
                    Folder::root()
                }
                Err(err) => {
                    warn!(error = %err, folder_id = %id, "Folder lookup failed; falling back to root");
                    Folder::root()
                }
            };
            store.dispatch_if(epoch, Action::FolderResolved { folder });
        });
    }

    /// Live child-folder snapshots for the current parent and user.
    fn subscribe_children(&self, epoch: Epoch, folder_id: Option<FolderId>) -> Subscription {
        let store = Arc::clone(&self.store);
        let handler: SnapshotHandler<Folder> = Arc::new(move |folders| {
            store.dispatch_if(epoch, Action::ChildrenResolved { folders });
        });
        self.documents
            .subscribe_children(folder_id, self.ctx.user_id, handler)
    }

    /// Live file snapshots for the folder's storage scope.
    fn subscribe_files(&self, epoch: Epoch, folder_id: Option<FolderId>) -> Subscription {
        let scope = folder_scope_path(self.ctx.user_id, folder_id);
        let store = Arc::clone(&self.store);
        let handler: SnapshotHandler<File> = Arc::new(move |files| {
            store.dispatch_if(epoch, Action::FilesResolved { files });
        });
        self.blobs.subscribe_scope(&scope, handler)
    }

    /// One-shot catalog fetch: the secondary reconciliation source. Its
    /// results dispatch the same actions as the live listeners, so the
    /// last delivery wins. Missing credentials make this a no-op;
    /// transient failures are logged and swallowed, leaving the last
    /// good snapshot in place.
    fn spawn_catalog_fetch(&self, epoch: Epoch, folder_id: Option<FolderId>) {
        let catalog = Arc::clone(&self.catalog);
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            match catalog.child_folders(folder_id).await {
                Ok(listing) => {
                    if let Some(folders) = listing.child_folders {
                        store.dispatch_if(epoch, Action::ChildrenResolved { folders });
                    }
                    if let Some(files) = listing.child_files {
                        store.dispatch_if(epoch, Action::FilesResolved { files });
                    }
                }
                Err(err) if err.is_unauthenticated() => {
                    debug!("Skipping catalog folder fetch; no credential");
                }
                Err(err) => {
                    warn!(error = %err, "Catalog folder fetch failed");
                }
            }

            match catalog.files_in_folder(folder_id).await {
                Ok(files) => {
                    store.dispatch_if(epoch, Action::FilesResolved { files });
                }
                Err(err) if err.is_unauthenticated() => {
                    debug!("Skipping catalog file fetch; no credential");
                }
                Err(err) => {
                    warn!(error = %err, "Catalog file fetch failed");
                }
            }
        });
    }
}

impl std::fmt::Debug for NavigationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationController")
            .field("ctx", &self.ctx)
            .field("epoch", &self.store.epoch())
            .finish_non_exhaustive()
    }
}
