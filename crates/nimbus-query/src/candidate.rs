//! A listing entry a query can be evaluated against.

use nimbus_entity::{File, Folder};

/// Either kind of listing entry.
///
/// Folders and files share the name and tag predicates; the `type:`
/// predicate only constrains files.
#[derive(Debug, Clone, Copy)]
pub enum Candidate<'a> {
    /// A child folder.
    Folder(&'a Folder),
    /// A child file.
    File(&'a File),
}

impl<'a> Candidate<'a> {
    /// The candidate's display name.
    pub fn name(&self) -> &'a str {
        match self {
            Self::Folder(folder) => &folder.name,
            Self::File(file) => &file.name,
        }
    }

    /// The candidate's tags, if any.
    pub fn tags(&self) -> Option<&'a str> {
        match self {
            Self::Folder(folder) => folder.tags.as_deref(),
            Self::File(file) => file.tags.as_deref(),
        }
    }

    /// Whether this candidate is a file.
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }
}

impl<'a> From<&'a Folder> for Candidate<'a> {
    fn from(folder: &'a Folder) -> Self {
        Self::Folder(folder)
    }
}

impl<'a> From<&'a File> for Candidate<'a> {
    fn from(file: &'a File) -> Self {
        Self::File(file)
    }
}
