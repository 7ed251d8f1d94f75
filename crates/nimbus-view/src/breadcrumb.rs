//! Breadcrumb derivation.

use serde::{Deserialize, Serialize};

use nimbus_core::types::FolderId;
use nimbus_entity::{Folder, PathSegment};

/// One entry in the ancestor-to-current navigation chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// The entry's folder ID (`None` for the root).
    pub id: Option<FolderId>,
    /// Display name.
    pub name: String,
    /// The `path` a navigation to this entry carries: only this entry's
    /// own ancestors, never anything below it. Empty for the terminal
    /// entry, which is not navigable.
    pub click_path: Vec<PathSegment>,
    /// Whether this is the terminal (current-folder) entry.
    pub active: bool,
}

/// Reconstruct the ordered ancestor chain for `current`.
///
/// The chain starts at the root sentinel (unless `current` *is* the
/// root), walks every stored `path` entry in order, and ends with
/// `current` itself marked active. Each non-terminal entry's
/// `click_path` is the slice of the chain strictly before it, minus the
/// leading root reference — freshly copied per entry, since handing the
/// same backing array to every entry would let one navigation's state
/// leak into another's.
pub fn resolve_path(current: &Folder) -> Vec<Breadcrumb> {
    let mut chain: Vec<PathSegment> = Vec::new();
    if !current.is_root() {
        chain.push(PathSegment::root());
    }
    chain.extend(current.path.iter().cloned());

    let mut crumbs = Vec::with_capacity(chain.len() + 1);
    for (index, segment) in chain.iter().enumerate() {
        let click_path = if index == 0 {
            Vec::new()
        } else {
            chain[1..index].to_vec()
        };
        crumbs.push(Breadcrumb {
            id: segment.id,
            name: segment.name.clone(),
            click_path,
            active: false,
        });
    }

    crumbs.push(Breadcrumb {
        id: current.id,
        name: current.name.clone(),
        click_path: Vec::new(),
        active: true,
    });

    crumbs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(name: &str, path: Vec<PathSegment>) -> Folder {
        Folder {
            id: Some(FolderId::new()),
            name: name.to_string(),
            path,
            ..Folder::root()
        }
    }

    #[test]
    fn test_root_resolves_to_single_active_entry() {
        let crumbs = resolve_path(&Folder::root());
        assert_eq!(crumbs.len(), 1);
        assert!(crumbs[0].active);
        assert!(crumbs[0].id.is_none());
        assert_eq!(crumbs[0].name, Folder::ROOT_NAME);
    }

    #[test]
    fn test_chain_shape_for_nested_folder() {
        let docs = folder("docs", Vec::new());
        let reports = folder("reports", docs.child_path());
        let q3 = folder("q3", reports.child_path());

        let crumbs = resolve_path(&q3);
        // Root, docs, reports, then q3 itself.
        assert_eq!(crumbs.len(), q3.path.len() + 2);
        let names: Vec<&str> = crumbs.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Root", "docs", "reports", "q3"]);

        assert!(crumbs.last().is_some_and(|c| c.active));
        assert!(crumbs[..crumbs.len() - 1].iter().all(|c| !c.active));
    }

    #[test]
    fn test_click_paths_carry_only_own_ancestors() {
        let docs = folder("docs", Vec::new());
        let reports = folder("reports", docs.child_path());
        let q3 = folder("q3", reports.child_path());

        let crumbs = resolve_path(&q3);
        // Root entry navigates with an empty path.
        assert!(crumbs[0].click_path.is_empty());
        // "docs" is a root child: still an empty path.
        assert!(crumbs[1].click_path.is_empty());
        // "reports" carries exactly [docs].
        assert_eq!(crumbs[2].click_path.len(), 1);
        assert_eq!(crumbs[2].click_path[0].name, "docs");
    }

    #[test]
    fn test_click_paths_do_not_alias() {
        let docs = folder("docs", Vec::new());
        let reports = folder("reports", docs.child_path());
        let q3 = folder("q3", reports.child_path());

        let mut crumbs = resolve_path(&q3);
        // Mutating one entry's path must not affect any other entry.
        crumbs[2].click_path.clear();
        let again = resolve_path(&q3);
        assert_eq!(again[2].click_path.len(), 1);
        assert!(crumbs[1].click_path.is_empty());
    }

    #[test]
    fn test_length_property() {
        let docs = folder("docs", Vec::new());
        // Non-root: path.len() + 1, plus the leading root entry.
        assert_eq!(resolve_path(&docs).len(), docs.path.len() + 2);
        // Root: just itself.
        assert_eq!(resolve_path(&Folder::root()).len(), 1);
    }
}
