//! HTTP implementation of the catalog contract.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use nimbus_core::config::api::ApiConfig;
use nimbus_core::error::{AppError, ErrorKind};
use nimbus_core::result::AppResult;
use nimbus_core::traits::token::TokenProvider;
use nimbus_core::types::{FileId, FolderId};
use nimbus_entity::File;

use crate::contract::{
    CatalogApi, ChildListing, CreateFolderRequest, MutationOutcome, UpdateFileRequest,
    UploadFileRequest,
};

/// Mutation response body, tolerant of the backend's shape drift (some
/// endpoints omit `success`, errors arrive as either `message` or
/// `error`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OutcomeBody {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    folder_id: Option<FolderId>,
}

/// `GET files/{folderId}` response body.
#[derive(Debug, Deserialize)]
struct FilesBody {
    #[serde(default)]
    files: Option<Vec<File>>,
}

/// The query-string rendition of an optional parent ID. The backend
/// expects the literal string `null` for the root, not an absent
/// parameter.
fn parent_param(parent_id: Option<FolderId>) -> String {
    match parent_id {
        Some(id) => id.to_string(),
        None => "null".to_string(),
    }
}

fn transport(action: &str, err: reqwest::Error) -> AppError {
    AppError::with_source(ErrorKind::Transient, format!("{action} failed: {err}"), err)
}

/// Catalog client over HTTP with bearer authentication.
pub struct HttpCatalogClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl HttpCatalogClient {
    /// Build a client from configuration.
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenProvider>) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// The current bearer token, or `Unauthenticated`.
    async fn bearer(&self) -> AppResult<String> {
        self.tokens
            .bearer_token()
            .await?
            .ok_or_else(|| AppError::unauthenticated("No credential available"))
    }

    /// Send a mutation and fold the response into a [`MutationOutcome`].
    async fn mutate(
        &self,
        action: &'static str,
        request: reqwest::RequestBuilder,
    ) -> MutationOutcome {
        let token = match self.bearer().await {
            Ok(token) => token,
            Err(err) => return MutationOutcome::failure(err.message),
        };

        let response = match request.bearer_auth(token).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, action, "Catalog mutation request failed");
                return MutationOutcome::failure(format!("{action} failed: {err}"));
            }
        };

        let status = response.status();
        let body = response.json::<OutcomeBody>().await.unwrap_or_default();

        if !status.is_success() {
            let detail = body
                .error
                .or(body.message)
                .unwrap_or_else(|| format!("{action} failed with status {status}"));
            warn!(%status, action, detail, "Catalog mutation rejected");
            return MutationOutcome::failure(detail);
        }

        MutationOutcome {
            success: body.success.unwrap_or(true),
            message: body.message,
            folder_id: body.folder_id,
        }
    }
}

impl fmt::Debug for HttpCatalogClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpCatalogClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn child_folders(&self, parent_id: Option<FolderId>) -> AppResult<ChildListing> {
        let token = self.bearer().await?;
        let response = self
            .http
            .get(self.url("folders"))
            .query(&[("parentId", parent_param(parent_id))])
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| transport("Folder listing", e))?
            .error_for_status()
            .map_err(|e| transport("Folder listing", e))?;

        response
            .json::<ChildListing>()
            .await
            .map_err(|e| AppError::serialization(format!("Malformed folder listing: {e}")))
    }

    async fn files_in_folder(&self, folder_id: Option<FolderId>) -> AppResult<Vec<File>> {
        let token = self.bearer().await?;
        let response = self
            .http
            .get(self.url(&format!("files/{}", parent_param(folder_id))))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| transport("File listing", e))?
            .error_for_status()
            .map_err(|e| transport("File listing", e))?;

        let body = response
            .json::<FilesBody>()
            .await
            .map_err(|e| AppError::serialization(format!("Malformed file listing: {e}")))?;
        Ok(body.files.unwrap_or_default())
    }

    async fn create_folder(&self, request: CreateFolderRequest) -> MutationOutcome {
        self.mutate(
            "Folder creation",
            self.http.post(self.url("folders")).json(&request),
        )
        .await
    }

    async fn rename_folder(&self, folder_id: FolderId, folder_name: &str) -> MutationOutcome {
        self.mutate(
            "Folder rename",
            self.http
                .put(self.url(&format!("folders/{folder_id}")))
                .json(&serde_json::json!({ "folderName": folder_name })),
        )
        .await
    }

    async fn delete_folder(&self, folder_id: FolderId) -> MutationOutcome {
        self.mutate(
            "Folder deletion",
            self.http.delete(self.url(&format!("folders/{folder_id}"))),
        )
        .await
    }

    async fn upload_file(&self, request: UploadFileRequest) -> MutationOutcome {
        self.mutate(
            "File upload",
            self.http.post(self.url("files")).json(&request),
        )
        .await
    }

    async fn update_file(&self, file_id: FileId, request: UpdateFileRequest) -> MutationOutcome {
        self.mutate(
            "File update",
            self.http
                .put(self.url(&format!("files/{file_id}")))
                .json(&request),
        )
        .await
    }

    async fn delete_file(&self, file_id: FileId, file_path: &str) -> MutationOutcome {
        self.mutate(
            "File deletion",
            self.http
                .delete(self.url(&format!("files/{file_id}")))
                .json(&serde_json::json!({ "filePath": file_path })),
        )
        .await
    }
}
