//! End-to-end reconciliation tests: controller + stores + catalog.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{sleep, timeout};

use nimbus_catalog::{
    CatalogApi, ChildListing, CreateFolderRequest, MutationOutcome, UpdateFileRequest,
    UploadFileRequest,
};
use nimbus_core::context::SessionContext;
use nimbus_core::error::AppError;
use nimbus_core::result::AppResult;
use nimbus_core::traits::token::TokenProvider;
use nimbus_core::types::{FileId, FolderId, UserId};
use nimbus_entity::{File, Folder};
use nimbus_service::LocalCatalog;
use nimbus_store::{BlobStore, DocumentStore, MemoryBlobStore, MemoryDocumentStore};
use nimbus_view::{NavigationController, ViewState, ViewStore};

#[derive(Debug)]
struct NoToken;

#[async_trait]
impl TokenProvider for NoToken {
    async fn bearer_token(&self) -> AppResult<Option<String>> {
        Ok(None)
    }
}

struct Harness {
    documents: Arc<MemoryDocumentStore>,
    catalog: Arc<LocalCatalog>,
    store: Arc<ViewStore>,
    controller: NavigationController,
}

fn harness() -> Harness {
    let ctx = SessionContext::new(UserId::new(), Arc::new(NoToken));
    let documents = Arc::new(MemoryDocumentStore::new());
    let blobs = Arc::new(MemoryBlobStore::new());
    let catalog = Arc::new(LocalCatalog::new(
        ctx.clone(),
        Arc::clone(&documents) as Arc<dyn DocumentStore>,
        Arc::clone(&blobs) as Arc<dyn BlobStore>,
    ));
    let store = Arc::new(ViewStore::new(None));
    let controller = NavigationController::new(
        ctx.clone(),
        Arc::clone(&documents) as Arc<dyn DocumentStore>,
        Arc::clone(&blobs) as Arc<dyn BlobStore>,
        Arc::clone(&catalog) as Arc<dyn CatalogApi>,
        Arc::clone(&store),
    );

    Harness {
        documents,
        catalog,
        store,
        controller,
    }
}

async fn wait_for(store: &Arc<ViewStore>, predicate: impl Fn(&ViewState) -> bool) -> ViewState {
    let mut rx = store.subscribe();
    let state = timeout(Duration::from_secs(2), rx.wait_for(|s| predicate(s)))
        .await
        .expect("state predicate not reached in time")
        .expect("store dropped");
    state.clone()
}

async fn create_folder(harness: &Harness, name: &str, parent: &Folder) -> FolderId {
    let outcome = harness
        .catalog
        .create_folder(CreateFolderRequest {
            folder_name: name.to_string(),
            parent_id: parent.id,
            path_arr: parent.child_path(),
        })
        .await;
    assert!(outcome.success, "folder creation failed: {:?}", outcome.message);
    outcome.folder_id.expect("created folder id")
}

#[tokio::test]
async fn test_selecting_root_resolves_synchronously() {
    let h = harness();
    h.controller.select(None);

    let state = h.store.snapshot();
    let folder = state.selected_folder.expect("root resolved inline");
    assert!(folder.is_root());
    assert!(state.child_folders.is_empty());
    assert!(state.child_files.is_empty());
}

#[tokio::test]
async fn test_navigation_populates_children_from_live_listeners() {
    let h = harness();
    let docs_id = create_folder(&h, "docs", &Folder::root()).await;

    h.controller.select(Some(docs_id));
    let state = wait_for(&h.store, |s| {
        s.selected_folder.as_ref().is_some_and(|f| f.name == "docs")
    })
    .await;
    assert_eq!(state.selected_folder_id, Some(docs_id));

    // A subfolder created while we watch arrives through the listener.
    let docs = h
        .documents
        .folder_by_id(docs_id)
        .await
        .expect("lookup")
        .expect("exists");
    create_folder(&h, "reports", &docs).await;
    wait_for(&h.store, |s| {
        s.child_folders.iter().any(|f| f.name == "reports")
    })
    .await;

    // So does a file uploaded into the folder.
    let upload = h
        .catalog
        .upload_file(UploadFileRequest::for_folder(
            &docs,
            "notes.txt",
            "bWVldGluZyBub3Rlcw==".to_string(),
        ))
        .await;
    assert!(upload.success);
    wait_for(&h.store, |s| {
        s.child_files.iter().any(|f| f.name == "notes_txt")
    })
    .await;
}

#[tokio::test]
async fn test_missing_folder_falls_open_to_root() {
    let h = harness();
    let ghost = FolderId::new();

    h.controller.select(Some(ghost));
    let state = wait_for(&h.store, |s| s.selected_folder.is_some()).await;

    // The lookup missed, so the sentinel stands in; the requested ID is
    // still what the view asked for.
    assert!(state.selected_folder.is_some_and(|f| f.is_root()));
    assert_eq!(state.selected_folder_id, Some(ghost));
}

#[tokio::test]
async fn test_refresh_never_flashes_empty() {
    let h = harness();
    let docs_id = create_folder(&h, "docs", &Folder::root()).await;
    let docs = h
        .documents
        .folder_by_id(docs_id)
        .await
        .expect("lookup")
        .expect("exists");
    h.catalog
        .upload_file(UploadFileRequest::for_folder(
            &docs,
            "notes.txt",
            "Zm9v".to_string(),
        ))
        .await;

    h.controller.select(Some(docs_id));
    wait_for(&h.store, |s| !s.child_files.is_empty()).await;

    h.controller.refresh();
    // Immediately after the refresh the old snapshot is still shown...
    let state = h.store.snapshot();
    assert_eq!(state.generation, 1);
    assert!(!state.child_files.is_empty(), "refresh must not flash empty");

    // ...and the new generation's data replaces it in place.
    let state = wait_for(&h.store, |s| {
        s.generation == 1 && s.child_files.iter().any(|f| f.name == "notes_txt")
    })
    .await;
    assert!(!state.child_files.is_empty());
}

#[tokio::test]
async fn test_reselect_tears_down_previous_sources() {
    let h = harness();
    let alpha_id = create_folder(&h, "alpha", &Folder::root()).await;
    let beta_id = create_folder(&h, "beta", &Folder::root()).await;

    h.controller.select(Some(alpha_id));
    wait_for(&h.store, |s| {
        s.selected_folder.as_ref().is_some_and(|f| f.name == "alpha")
    })
    .await;

    h.controller.select(Some(beta_id));
    wait_for(&h.store, |s| {
        s.selected_folder.as_ref().is_some_and(|f| f.name == "beta")
    })
    .await;

    // A mutation under alpha's scope must not leak into beta's view.
    let alpha = h
        .documents
        .folder_by_id(alpha_id)
        .await
        .expect("lookup")
        .expect("exists");
    h.catalog
        .upload_file(UploadFileRequest::for_folder(
            &alpha,
            "stray.txt",
            "Zm9v".to_string(),
        ))
        .await;

    sleep(Duration::from_millis(50)).await;
    let state = h.store.snapshot();
    assert_eq!(state.selected_folder_id, Some(beta_id));
    assert!(
        state.child_files.iter().all(|f| f.name != "stray_txt"),
        "file from a torn-down scope leaked into the current view"
    );
}

#[tokio::test]
async fn test_rapid_reselection_settles_on_last_folder() {
    let h = harness();
    let alpha_id = create_folder(&h, "alpha", &Folder::root()).await;
    let beta_id = create_folder(&h, "beta", &Folder::root()).await;

    // No awaits in between: alpha's lookups are still in flight when
    // beta takes over, and must be discarded on arrival.
    h.controller.select(Some(alpha_id));
    h.controller.select(Some(beta_id));

    let state = wait_for(&h.store, |s| s.selected_folder.is_some()).await;
    assert_eq!(state.selected_folder_id, Some(beta_id));
    assert!(state.selected_folder.is_some_and(|f| f.name == "beta"));
}

/// A catalog with no credential: every read no-ops.
#[derive(Debug)]
struct UnauthenticatedCatalog;

#[async_trait]
impl CatalogApi for UnauthenticatedCatalog {
    async fn child_folders(&self, _parent_id: Option<FolderId>) -> AppResult<ChildListing> {
        Err(AppError::unauthenticated("No credential available"))
    }

    async fn files_in_folder(&self, _folder_id: Option<FolderId>) -> AppResult<Vec<File>> {
        Err(AppError::unauthenticated("No credential available"))
    }

    async fn create_folder(&self, _request: CreateFolderRequest) -> MutationOutcome {
        MutationOutcome::failure("No credential available")
    }

    async fn rename_folder(&self, _folder_id: FolderId, _name: &str) -> MutationOutcome {
        MutationOutcome::failure("No credential available")
    }

    async fn delete_folder(&self, _folder_id: FolderId) -> MutationOutcome {
        MutationOutcome::failure("No credential available")
    }

    async fn upload_file(&self, _request: UploadFileRequest) -> MutationOutcome {
        MutationOutcome::failure("No credential available")
    }

    async fn update_file(&self, _file_id: FileId, _request: UpdateFileRequest) -> MutationOutcome {
        MutationOutcome::failure("No credential available")
    }

    async fn delete_file(&self, _file_id: FileId, _file_path: &str) -> MutationOutcome {
        MutationOutcome::failure("No credential available")
    }
}

#[tokio::test]
async fn test_unauthenticated_catalog_is_a_silent_no_op() {
    let ctx = SessionContext::new(UserId::new(), Arc::new(NoToken));
    let documents = Arc::new(MemoryDocumentStore::new());
    let blobs = Arc::new(MemoryBlobStore::new());
    let store = Arc::new(ViewStore::new(None));
    let controller = NavigationController::new(
        ctx.clone(),
        Arc::clone(&documents) as Arc<dyn DocumentStore>,
        Arc::clone(&blobs) as Arc<dyn BlobStore>,
        Arc::new(UnauthenticatedCatalog),
        Arc::clone(&store),
    );

    // Seed a folder the live listener can deliver.
    documents
        .create_folder(Folder {
            id: Some(FolderId::new()),
            name: "docs".to_string(),
            parent_id: None,
            path: Vec::new(),
            owner_id: Some(ctx.user_id),
            tags: None,
            created_at: None,
        })
        .await
        .expect("seed");

    controller.select(None);
    let state = wait_for(&store, |s| !s.child_folders.is_empty()).await;
    assert_eq!(state.child_folders[0].name, "docs");

    // Give the catalog tasks time to (not) do anything destructive.
    sleep(Duration::from_millis(50)).await;
    let state = store.snapshot();
    assert_eq!(state.child_folders.len(), 1, "no-op source must not clear state");
}
