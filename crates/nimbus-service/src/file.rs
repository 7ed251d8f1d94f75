//! File upload, update, and deletion against the blob store.

use std::sync::Arc;

use tracing::{info, warn};

use nimbus_catalog::{MutationOutcome, UpdateFileRequest, UploadFileRequest};
use nimbus_core::context::SessionContext;
use nimbus_core::types::FileId;
use nimbus_entity::{File, sanitize_file_name};
use nimbus_store::BlobStore;

/// Manages file CRUD against the blob store.
#[derive(Debug, Clone)]
pub struct FileService {
    blobs: Arc<dyn BlobStore>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self { blobs }
    }

    /// Stores a new file at its derived path.
    ///
    /// An upload whose path is already occupied is rejected rather than
    /// silently overwritten.
    pub async fn upload_file(
        &self,
        ctx: &SessionContext,
        request: UploadFileRequest,
    ) -> MutationOutcome {
        if request.name.trim().is_empty() || request.content.is_empty() || request.path.is_empty()
        {
            return MutationOutcome::failure("Missing required fields");
        }

        match self.blobs.file_at(ctx.user_id, &request.path).await {
            Ok(Some(_)) => {
                return MutationOutcome::failure("A file with this name already exists");
            }
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, path = %request.path, "Upload existence check failed");
                return MutationOutcome::failure("Internal server error");
            }
        }

        let file = File {
            id: FileId::new(),
            name: sanitize_file_name(request.name.trim()),
            content: request.content,
            path: request.path,
            folder_id: request.folder_id,
            owner_id: ctx.user_id,
            tags: None,
            created_at: None,
        };

        match self.blobs.put_file(ctx.user_id, file).await {
            Ok(stored) => {
                info!(user_id = %ctx.user_id, path = %stored.path, "File uploaded");
                MutationOutcome {
                    message: Some("File uploaded successfully".to_string()),
                    ..MutationOutcome::ok()
                }
            }
            Err(err) => {
                warn!(error = %err, "Failed to upload file");
                MutationOutcome::failure("Internal server error")
            }
        }
    }

    /// Replaces a file's name and content in place (the path is stable).
    pub async fn update_file(
        &self,
        ctx: &SessionContext,
        request: UpdateFileRequest,
    ) -> MutationOutcome {
        if request.name.trim().is_empty() || request.content.is_empty() {
            return MutationOutcome::failure("Missing name or content");
        }

        match self
            .blobs
            .update_file(
                ctx.user_id,
                &request.file_path,
                request.name.trim(),
                &request.content,
            )
            .await
        {
            Ok(updated) => {
                info!(user_id = %ctx.user_id, path = %updated.path, "File updated");
                MutationOutcome::ok()
            }
            Err(err) => {
                warn!(error = %err, path = %request.file_path, "Failed to update file");
                MutationOutcome::failure(err.message)
            }
        }
    }

    /// Removes the file at `file_path`. Deleting an absent path is not
    /// an error (the store's removal is idempotent).
    pub async fn delete_file(&self, ctx: &SessionContext, file_path: &str) -> MutationOutcome {
        match self.blobs.delete_file(ctx.user_id, file_path).await {
            Ok(_) => {
                info!(user_id = %ctx.user_id, path = %file_path, "File deleted");
                MutationOutcome::ok()
            }
            Err(err) => {
                warn!(error = %err, path = %file_path, "Failed to delete file");
                MutationOutcome::failure(err.message)
            }
        }
    }
}
