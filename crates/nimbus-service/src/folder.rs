//! Folder CRUD operations, including the cascading delete.

use std::sync::Arc;

use tracing::{info, warn};

use nimbus_catalog::{CreateFolderRequest, MutationOutcome};
use nimbus_core::context::SessionContext;
use nimbus_core::types::FolderId;
use nimbus_entity::Folder;
use nimbus_store::{BlobStore, DocumentStore};

/// Manages folder CRUD against the document store, cascading file
/// deletion into the blob store.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder documents.
    documents: Arc<dyn DocumentStore>,
    /// File blobs (for the cascade).
    blobs: Arc<dyn BlobStore>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(documents: Arc<dyn DocumentStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { documents, blobs }
    }

    /// Creates a folder under the parent described by the request.
    pub async fn create_folder(
        &self,
        ctx: &SessionContext,
        request: CreateFolderRequest,
    ) -> MutationOutcome {
        let name = request.folder_name.trim();
        if name.is_empty() {
            return MutationOutcome::failure("Missing folderName");
        }

        let folder = Folder {
            id: Some(FolderId::new()),
            name: name.to_string(),
            parent_id: request.parent_id,
            path: request.path_arr,
            owner_id: Some(ctx.user_id),
            tags: None,
            created_at: None,
        };

        match self.documents.create_folder(folder).await {
            Ok(created) => {
                info!(
                    user_id = %ctx.user_id,
                    folder_id = ?created.id,
                    name = %created.name,
                    "Folder created"
                );
                match created.id {
                    Some(id) => MutationOutcome::created(id),
                    None => MutationOutcome::ok(),
                }
            }
            Err(err) => {
                warn!(error = %err, "Failed to add folder");
                MutationOutcome::failure("Failed to add folder")
            }
        }
    }

    /// Renames a folder.
    pub async fn rename_folder(&self, folder_id: FolderId, folder_name: &str) -> MutationOutcome {
        let name = folder_name.trim();
        if name.is_empty() {
            return MutationOutcome::failure("Missing folderName");
        }

        match self.documents.rename_folder(folder_id, name).await {
            Ok(_) => MutationOutcome {
                message: Some("Folder updated".to_string()),
                ..MutationOutcome::ok()
            },
            Err(err) => {
                warn!(error = %err, folder_id = %folder_id, "Failed to update folder");
                MutationOutcome::failure("Failed to update folder")
            }
        }
    }

    /// Deletes a folder and every file whose `folder_id` references it.
    ///
    /// Two-phase: files are deleted first, and the folder document is
    /// only removed once every file deletion succeeded. On a file
    /// deletion failure the operation aborts and the folder remains, so
    /// a folder record never outlives the operation with dangling file
    /// references; re-running the delete is safe.
    pub async fn delete_folder(&self, ctx: &SessionContext, folder_id: FolderId) -> MutationOutcome {
        let scope = format!("files/{}", ctx.user_id);
        let files = match self.blobs.files_under(&scope).await {
            Ok(files) => files,
            Err(err) => {
                warn!(error = %err, folder_id = %folder_id, "Failed to enumerate folder files");
                return MutationOutcome::failure("Failed to delete folder");
            }
        };

        for file in files
            .iter()
            .filter(|file| file.folder_id == Some(folder_id))
        {
            if let Err(err) = self.blobs.delete_file(ctx.user_id, &file.path).await {
                warn!(
                    error = %err,
                    folder_id = %folder_id,
                    path = %file.path,
                    "Cascade aborted; folder not deleted"
                );
                return MutationOutcome::failure("Failed to delete folder");
            }
        }

        match self.documents.delete_folder(folder_id).await {
            Ok(_) => {
                info!(user_id = %ctx.user_id, folder_id = %folder_id, "Folder deleted");
                MutationOutcome {
                    message: Some("Folder deleted".to_string()),
                    ..MutationOutcome::ok()
                }
            }
            Err(err) => {
                warn!(error = %err, folder_id = %folder_id, "Failed to delete folder");
                MutationOutcome::failure("Failed to delete folder")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use nimbus_core::result::AppResult;
    use nimbus_core::traits::token::TokenProvider;
    use nimbus_core::types::UserId;
    use nimbus_entity::{File, file_storage_path};
    use nimbus_store::{MemoryBlobStore, MemoryDocumentStore};

    #[derive(Debug)]
    struct NoToken;

    #[async_trait::async_trait]
    impl TokenProvider for NoToken {
        async fn bearer_token(&self) -> AppResult<Option<String>> {
            Ok(None)
        }
    }

    fn session() -> SessionContext {
        SessionContext::new(UserId::new(), Arc::new(NoToken))
    }

    fn seeded_file(folder: &Folder, owner: UserId, name: &str) -> File {
        File {
            id: nimbus_core::types::FileId::new(),
            name: name.to_string(),
            content: "Zm9v".to_string(),
            path: file_storage_path(folder, name),
            folder_id: folder.id,
            owner_id: owner,
            tags: None,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let service = FolderService::new(
            Arc::new(MemoryDocumentStore::new()),
            Arc::new(MemoryBlobStore::new()),
        );
        let outcome = service
            .create_folder(
                &session(),
                CreateFolderRequest {
                    folder_name: "   ".to_string(),
                    parent_id: None,
                    path_arr: Vec::new(),
                },
            )
            .await;
        assert!(!outcome.success);
    }

    #[tokio::test]
    async fn test_create_returns_new_folder_id() {
        let documents = Arc::new(MemoryDocumentStore::new());
        let service =
            FolderService::new(Arc::clone(&documents) as _, Arc::new(MemoryBlobStore::new()));
        let ctx = session();

        let outcome = service
            .create_folder(
                &ctx,
                CreateFolderRequest {
                    folder_name: "docs".to_string(),
                    parent_id: None,
                    path_arr: Folder::root().child_path(),
                },
            )
            .await;

        assert!(outcome.success);
        let id = outcome.folder_id.expect("assigned id");
        let stored = documents
            .folder_by_id(id)
            .await
            .expect("lookup")
            .expect("exists");
        assert_eq!(stored.name, "docs");
        assert_eq!(stored.owner_id, Some(ctx.user_id));
    }

    #[tokio::test]
    async fn test_delete_cascades_to_files() {
        let documents = Arc::new(MemoryDocumentStore::new());
        let blobs = Arc::new(MemoryBlobStore::new());
        let service = FolderService::new(Arc::clone(&documents) as _, Arc::clone(&blobs) as _);
        let ctx = session();

        let folder = documents
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
            .expect("create folder");

        blobs
            .put_file(ctx.user_id, seeded_file(&folder, ctx.user_id, "a_txt"))
            .await
            .expect("seed file");
        blobs
            .put_file(ctx.user_id, seeded_file(&folder, ctx.user_id, "b_txt"))
            .await
            .expect("seed file");
        // A file in another folder must survive the cascade.
        blobs
            .put_file(ctx.user_id, seeded_file(&Folder::root(), ctx.user_id, "keep_txt"))
            .await
            .expect("seed file");

        let outcome = service
            .delete_folder(&ctx, folder.id.expect("id"))
            .await;
        assert!(outcome.success);

        let remaining = blobs
            .files_under(&format!("files/{}", ctx.user_id))
            .await
            .expect("list");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "keep_txt");
        assert!(remaining.iter().all(|f| f.folder_id != folder.id));

        assert!(
            documents
                .folder_by_id(folder.id.expect("id"))
                .await
                .expect("lookup")
                .is_none()
        );
    }
}
