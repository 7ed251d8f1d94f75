//! Storage path derivation and file name sanitization.
//!
//! Blob-store keys cannot contain `. # $ [ ]`, so uploaded file names are
//! sanitized before storage. This sanitization is what produces the
//! underscore type markers (`photo.png` → `photo_png`) that
//! [`crate::file::FileKind`] classifies on.

use nimbus_core::types::{FolderId, UserId};

use crate::folder::Folder;

/// Replace blob-store-hostile characters in a file name with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.replace(['.', '#', '$', '[', ']'], "_")
}

/// The storage path for a file uploaded into `folder`.
///
/// Joins the folder's ancestor ids, the folder's own id (unless the
/// folder is the root), and the sanitized file name with `/`. The
/// returned path is relative to the user scope (see
/// [`folder_scope_path`]).
pub fn file_storage_path(folder: &Folder, file_name: &str) -> String {
    let mut parts: Vec<String> = folder
        .path
        .iter()
        .filter_map(|seg| seg.id.map(|id| id.to_string()))
        .collect();
    if let Some(id) = folder.id {
        parts.push(id.to_string());
    }
    parts.push(sanitize_file_name(file_name));
    parts.join("/")
}

/// The blob-store scope listened to / listed for a folder's files:
/// `files/{user}` at the root, `files/{user}/{folder}` elsewhere.
pub fn folder_scope_path(user_id: UserId, folder_id: Option<FolderId>) -> String {
    match folder_id {
        None => format!("files/{user_id}"),
        Some(id) => format!("files/{user_id}/{id}"),
    }
}
