//! Catalog API contract and DTOs.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use nimbus_core::result::AppResult;
use nimbus_core::types::{FileId, FolderId};
use nimbus_entity::{File, Folder, PathSegment};

/// One folder's children as reported by the catalog.
///
/// Either collection may be absent; an absent collection means "no
/// statement", not "empty" — the reconciler only replaces what the
/// response actually carries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildListing {
    /// Child folders, if the response carried them.
    #[serde(default)]
    pub child_folders: Option<Vec<Folder>>,
    /// Child files, if the response carried them.
    #[serde(default)]
    pub child_files: Option<Vec<File>>,
}

/// Outcome of a catalog mutation.
///
/// Mutations never fail with an error across the reconciliation
/// boundary; callers branch on `success` and display `message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationOutcome {
    /// Whether the mutation was applied.
    pub success: bool,
    /// Human-readable detail, when the backend provided one.
    #[serde(default)]
    pub message: Option<String>,
    /// The created folder's ID, for folder creation.
    #[serde(default)]
    pub folder_id: Option<FolderId>,
}

impl MutationOutcome {
    /// A plain success.
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
            folder_id: None,
        }
    }

    /// A success carrying the created folder's ID.
    pub fn created(folder_id: FolderId) -> Self {
        Self {
            success: true,
            message: None,
            folder_id: Some(folder_id),
        }
    }

    /// A failure with a display message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            folder_id: None,
        }
    }
}

/// Request body for folder creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    /// The new folder's name.
    pub folder_name: String,
    /// Parent folder (`None` for children of the root).
    pub parent_id: Option<FolderId>,
    /// The new folder's materialized ancestor path.
    pub path_arr: Vec<PathSegment>,
}

/// Request body for file upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileRequest {
    /// Sanitized file name.
    pub name: String,
    /// Base64-encoded payload.
    pub content: String,
    /// Storage path (ancestor ids + name).
    pub path: String,
    /// The containing folder (`None` for the root).
    pub folder_id: Option<FolderId>,
}

impl UploadFileRequest {
    /// Build the upload request for a file dropped into `folder`,
    /// sanitizing the name and deriving the storage path the way the
    /// blob store expects them.
    pub fn for_folder(folder: &Folder, original_name: &str, content: String) -> Self {
        let name = original_name.trim();
        Self {
            name: nimbus_entity::sanitize_file_name(name),
            content,
            path: nimbus_entity::file_storage_path(folder, name),
            folder_id: folder.id,
        }
    }
}

/// Request body for file update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFileRequest {
    /// New file name.
    pub name: String,
    /// New base64-encoded payload.
    pub content: String,
    /// Storage path of the file being updated.
    pub file_path: String,
}

/// The request/response catalog backend.
///
/// Reads return `Err` only for transport-level conditions
/// (`Unauthenticated`, `Transient`, …) which callers log and swallow;
/// mutations always resolve to a [`MutationOutcome`].
#[async_trait]
pub trait CatalogApi: Send + Sync + fmt::Debug + 'static {
    /// `GET folders?parentId=` — children of a folder, for reconciliation.
    async fn child_folders(&self, parent_id: Option<FolderId>) -> AppResult<ChildListing>;

    /// `GET files/{folderId}` — the files of a folder.
    async fn files_in_folder(&self, folder_id: Option<FolderId>) -> AppResult<Vec<File>>;

    /// `POST folders` — create a folder.
    async fn create_folder(&self, request: CreateFolderRequest) -> MutationOutcome;

    /// `PUT folders/{id}` — rename a folder.
    async fn rename_folder(&self, folder_id: FolderId, folder_name: &str) -> MutationOutcome;

    /// `DELETE folders/{id}` — delete a folder and, by cascade, its files.
    async fn delete_folder(&self, folder_id: FolderId) -> MutationOutcome;

    /// `POST files` — upload a file.
    async fn upload_file(&self, request: UploadFileRequest) -> MutationOutcome;

    /// `PUT files/{id}` — update a file's name and content.
    async fn update_file(&self, file_id: FileId, request: UpdateFileRequest) -> MutationOutcome;

    /// `DELETE files/{id}` — delete a file.
    async fn delete_file(&self, file_id: FileId, file_path: &str) -> MutationOutcome;
}
