//! Catalog API served directly from the backing stores.

use std::sync::Arc;

use async_trait::async_trait;

use nimbus_catalog::{
    CatalogApi, ChildListing, CreateFolderRequest, MutationOutcome, UpdateFileRequest,
    UploadFileRequest,
};
use nimbus_core::context::SessionContext;
use nimbus_core::result::AppResult;
use nimbus_core::types::{FileId, FolderId};
use nimbus_entity::File;
use nimbus_store::{BlobStore, DocumentStore};

use crate::file::FileService;
use crate::folder::FolderService;

/// A [`CatalogApi`] implementation over local stores.
///
/// This is the poll-style reconciliation source for single-node
/// embedding and the integration tests: the same store state the live
/// listeners observe, answered through the request/response contract.
#[derive(Debug, Clone)]
pub struct LocalCatalog {
    ctx: SessionContext,
    documents: Arc<dyn DocumentStore>,
    blobs: Arc<dyn BlobStore>,
    folders: FolderService,
    files: FileService,
}

impl LocalCatalog {
    /// Creates a local catalog for one session.
    pub fn new(
        ctx: SessionContext,
        documents: Arc<dyn DocumentStore>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        let folders = FolderService::new(Arc::clone(&documents), Arc::clone(&blobs));
        let files = FileService::new(Arc::clone(&blobs));
        Self {
            ctx,
            documents,
            blobs,
            folders,
            files,
        }
    }
}

#[async_trait]
impl CatalogApi for LocalCatalog {
    async fn child_folders(&self, parent_id: Option<FolderId>) -> AppResult<ChildListing> {
        let folders = self
            .documents
            .folders_by_parent(parent_id, self.ctx.user_id)
            .await?;
        Ok(ChildListing {
            child_folders: Some(folders),
            child_files: None,
        })
    }

    async fn files_in_folder(&self, folder_id: Option<FolderId>) -> AppResult<Vec<File>> {
        let scope = format!("files/{}", self.ctx.user_id);
        let files = self.blobs.files_under(&scope).await?;
        Ok(files
            .into_iter()
            .filter(|file| file.folder_id == folder_id)
            .collect())
    }

    async fn create_folder(&self, request: CreateFolderRequest) -> MutationOutcome {
        self.folders.create_folder(&self.ctx, request).await
    }

    async fn rename_folder(&self, folder_id: FolderId, folder_name: &str) -> MutationOutcome {
        self.folders.rename_folder(folder_id, folder_name).await
    }

    async fn delete_folder(&self, folder_id: FolderId) -> MutationOutcome {
        self.folders.delete_folder(&self.ctx, folder_id).await
    }

    async fn upload_file(&self, request: UploadFileRequest) -> MutationOutcome {
        self.files.upload_file(&self.ctx, request).await
    }

    async fn update_file(&self, _file_id: FileId, request: UpdateFileRequest) -> MutationOutcome {
        // The blob store addresses files by path; the ID is part of the
        // wire contract only.
        self.files.update_file(&self.ctx, request).await
    }

    async fn delete_file(&self, _file_id: FileId, file_path: &str) -> MutationOutcome {
        self.files.delete_file(&self.ctx, file_path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use nimbus_core::result::AppResult as CoreResult;
    use nimbus_core::traits::token::TokenProvider;
    use nimbus_core::types::UserId;
    use nimbus_entity::Folder;
    use nimbus_store::{MemoryBlobStore, MemoryDocumentStore};

    #[derive(Debug)]
    struct NoToken;

    #[async_trait]
    impl TokenProvider for NoToken {
        async fn bearer_token(&self) -> CoreResult<Option<String>> {
            Ok(None)
        }
    }

    fn catalog() -> LocalCatalog {
        let ctx = SessionContext::new(UserId::new(), Arc::new(NoToken));
        LocalCatalog::new(
            ctx,
            Arc::new(MemoryDocumentStore::new()),
            Arc::new(MemoryBlobStore::new()),
        )
    }

    #[tokio::test]
    async fn test_round_trip_through_contract() {
        let catalog = catalog();

        let outcome = catalog
            .create_folder(CreateFolderRequest {
                folder_name: "docs".to_string(),
                parent_id: None,
                path_arr: Folder::root().child_path(),
            })
            .await;
        assert!(outcome.success);
        let folder_id = outcome.folder_id.expect("created id");

        let listing = catalog.child_folders(None).await.expect("listing");
        let folders = listing.child_folders.expect("folders present");
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].name, "docs");

        let upload = catalog
            .upload_file(UploadFileRequest::for_folder(
                &folders[0],
                "notes.txt",
                "Zm9v".to_string(),
            ))
            .await;
        assert!(upload.success);

        let files = catalog
            .files_in_folder(Some(folder_id))
            .await
            .expect("files");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "notes_txt");

        // Cascade through the contract.
        assert!(catalog.delete_folder(folder_id).await.success);
        assert!(
            catalog
                .files_in_folder(Some(folder_id))
                .await
                .expect("files")
                .is_empty()
        );
    }
}
