//! View state, actions, and the reducer.

use nimbus_core::types::FolderId;
use nimbus_entity::{File, Folder};

/// The `(selected folder, generation)` pair a piece of async work was
/// started under. Results are only applied while the store is still on
/// the same pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Epoch {
    /// The folder the work belongs to.
    pub folder_id: Option<FolderId>,
    /// The refresh generation the work belongs to.
    pub generation: u64,
}

/// The single authoritative view model.
#[derive(Debug, Clone)]
pub struct ViewState {
    /// The selected folder's ID (`None` for the root).
    pub selected_folder_id: Option<FolderId>,
    /// The resolved selected folder; `None` while the lookup is pending.
    pub selected_folder: Option<Folder>,
    /// Child folders, replaced verbatim by each snapshot.
    pub child_folders: Vec<Folder>,
    /// Child files, replaced verbatim by each snapshot.
    pub child_files: Vec<File>,
    /// Manual-refresh counter; bumping it invalidates in-flight work.
    pub generation: u64,
}

impl ViewState {
    /// The state a freshly mounted view starts from.
    pub fn initial(folder_id: Option<FolderId>) -> Self {
        Self {
            selected_folder_id: folder_id,
            selected_folder: None,
            child_folders: Vec::new(),
            child_files: Vec::new(),
            generation: 0,
        }
    }

    /// The epoch this state is on.
    pub fn epoch(&self) -> Epoch {
        Epoch {
            folder_id: self.selected_folder_id,
            generation: self.generation,
        }
    }
}

/// Actions the view store reduces over.
#[derive(Debug, Clone)]
pub enum Action {
    /// Navigate to a folder: clears the children and marks the folder
    /// lookup pending.
    Select {
        /// The newly selected folder (`None` for the root).
        folder_id: Option<FolderId>,
    },
    /// The selected folder's record arrived (the root sentinel when the
    /// lookup missed or failed).
    FolderResolved {
        /// The resolved folder.
        folder: Folder,
    },
    /// A full child-folder snapshot arrived.
    ChildrenResolved {
        /// The replacement child folders.
        folders: Vec<Folder>,
    },
    /// A full child-file snapshot arrived.
    FilesResolved {
        /// The replacement child files.
        files: Vec<File>,
    },
    /// Manual refresh: bumps the generation. Deliberately does **not**
    /// clear the children — stale data stays visible until results for
    /// the new generation supersede it, so the view never flashes empty.
    Refresh,
}

/// The reducer. Pure and total: no I/O, no panics.
pub fn reduce(state: &ViewState, action: &Action) -> ViewState {
    match action {
        Action::Select { folder_id } => ViewState {
            selected_folder_id: *folder_id,
            selected_folder: None,
            child_folders: Vec::new(),
            child_files: Vec::new(),
            generation: state.generation,
        },
        Action::FolderResolved { folder } => ViewState {
            selected_folder: Some(folder.clone()),
            ..state.clone()
        },
        Action::ChildrenResolved { folders } => ViewState {
            child_folders: folders.clone(),
            ..state.clone()
        },
        Action::FilesResolved { files } => ViewState {
            child_files: files.clone(),
            ..state.clone()
        },
        Action::Refresh => ViewState {
            generation: state.generation + 1,
            ..state.clone()
        },
    }
}
