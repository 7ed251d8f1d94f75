//! File entity model.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nimbus_core::error::AppError;
use nimbus_core::result::AppResult;
use nimbus_core::types::{FileId, FolderId, UserId};

use super::kind::{self, FileKind};

/// A file stored in the key/value blob store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    /// Unique file identifier.
    pub id: FileId,
    /// Sanitized file name, carrying the underscore type marker.
    pub name: String,
    /// Base64-encoded payload.
    pub content: String,
    /// Storage path: slash-joined ancestor folder ids plus the file name.
    pub path: String,
    /// The folder containing this file (`None` for files at the root).
    #[serde(default)]
    pub folder_id: Option<FolderId>,
    /// The file owner.
    pub owner_id: UserId,
    /// Comma-separated tags, if any.
    #[serde(default)]
    pub tags: Option<String>,
    /// When the file was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl File {
    /// The effective type of this file (image / text / other).
    pub fn kind(&self) -> FileKind {
        FileKind::from_name(&self.name)
    }

    /// The legacy MIME type for this file (see [`kind::mime_type`]).
    pub fn mime_type(&self) -> &'static str {
        kind::mime_type(&self.name)
    }

    /// Decode the base64 payload into UTF-8 text.
    pub fn decode_content(&self) -> AppResult<String> {
        let bytes = BASE64
            .decode(&self.content)
            .map_err(|e| AppError::serialization(format!("Failed to decode payload: {e}")))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::serialization(format!("Payload is not UTF-8: {e}")))
    }
}
