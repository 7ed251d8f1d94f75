//! Folder entity model and the root sentinel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nimbus_core::types::{FolderId, UserId};

/// One ancestor reference inside a folder's materialized path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSegment {
    /// The ancestor's ID (`None` for the root reference).
    pub id: Option<FolderId>,
    /// The ancestor's display name.
    pub name: String,
}

impl PathSegment {
    /// Creates a segment for a persisted folder.
    pub fn new(id: FolderId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    /// The segment representing the root of the hierarchy.
    pub fn root() -> Self {
        Self {
            id: None,
            name: Folder::ROOT_NAME.to_string(),
        }
    }
}

/// A folder in the hierarchy.
///
/// The distinguished **root folder** has `id = None` and an empty `path`;
/// it is a constant sentinel and is never persisted. For any persisted
/// folder, `path` lists every ancestor from root-child to immediate
/// parent, in order, so `path.len()` equals depth minus one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Unique folder identifier (`None` for the root sentinel).
    pub id: Option<FolderId>,
    /// Folder name.
    pub name: String,
    /// Parent folder ID (`None` for children of the root).
    #[serde(default)]
    pub parent_id: Option<FolderId>,
    /// Ordered ancestor references, root-child first.
    #[serde(default)]
    pub path: Vec<PathSegment>,
    /// The folder owner (`None` only for the root sentinel).
    #[serde(default)]
    pub owner_id: Option<UserId>,
    /// Comma-separated tags, if any.
    #[serde(default)]
    pub tags: Option<String>,
    /// When the folder was created (`None` for the root sentinel).
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Folder {
    /// Display name of the root sentinel.
    pub const ROOT_NAME: &'static str = "Root";

    /// The root sentinel.
    pub fn root() -> Self {
        Self {
            id: None,
            name: Self::ROOT_NAME.to_string(),
            parent_id: None,
            path: Vec::new(),
            owner_id: None,
            tags: None,
            created_at: None,
        }
    }

    /// Whether this folder is the root sentinel.
    pub fn is_root(&self) -> bool {
        self.id.is_none()
    }

    /// This folder as a path segment, for embedding in descendants' paths.
    pub fn as_segment(&self) -> PathSegment {
        PathSegment {
            id: self.id,
            name: self.name.clone(),
        }
    }

    /// The `path` value a child created under this folder receives.
    ///
    /// The root sentinel contributes no segment of its own, so children
    /// of the root start with an empty path.
    pub fn child_path(&self) -> Vec<PathSegment> {
        let mut path = self.path.clone();
        if !self.is_root() {
            path.push(self.as_segment());
        }
        path
    }
}
