//! Navigation state over a folder tree.
//!
//! Tracks the folder currently shown in grid mode and the "smart root" the
//! explorer opens at. Both are revalidated against every fresh tree; a path
//! that no longer resolves is reset rather than patched.

use crate::tree::{FolderNode, find_node};

/// Deepest folder reachable from the root by descending through folders with
/// exactly one child and no files. Collapses a single wrapper chain (such as
/// a configured prefix) so the explorer opens on meaningful content. This is
/// a heuristic: a flat store with no common prefix yields an empty base path.
pub fn compute_base_path(root: &FolderNode) -> Vec<String> {
    let mut path = Vec::new();
    let mut node = root;
    while node.files.is_empty() && node.children.len() == 1 {
        node = &node.children[0];
        path.push(node.name.clone());
    }
    path
}

/// Valid iff every segment resolves to an existing child. The empty path is
/// valid against any tree.
pub fn is_path_valid(root: &FolderNode, path: &[String]) -> bool {
    find_node(root, path).is_some()
}

#[derive(Clone, Debug, Default)]
pub struct NavState {
    base_path: Vec<String>,
    current_path: Vec<String>,
}

impl NavState {
    pub fn base_path(&self) -> &[String] {
        &self.base_path
    }

    pub fn current_path(&self) -> &[String] {
        &self.current_path
    }

    /// Called after every successful listing: recompute the smart root and
    /// reset `current_path` to it if the old path no longer resolves.
    pub fn revalidate(&mut self, root: &FolderNode) {
        self.base_path = compute_base_path(root);
        if !is_path_valid(root, &self.current_path) {
            self.current_path = self.base_path.clone();
        }
    }

    /// Wholesale replacement; navigation never merges partial paths.
    pub fn navigate_to(&mut self, path: Vec<String>) {
        self.current_path = path;
    }

    pub fn up(&mut self) {
        if self.current_path.len() > self.base_path.len() {
            self.current_path.pop();
        }
    }

    pub fn home(&mut self) {
        self.current_path = self.base_path.clone();
    }

    /// Walk to the current folder, degrading to the deepest node reached if a
    /// segment fails to resolve. Used between a mutation and the next refresh,
    /// when the tree may briefly disagree with the path.
    pub fn current_folder<'a>(&self, root: &'a FolderNode) -> &'a FolderNode {
        let mut node = root;
        for seg in &self.current_path {
            match node.child(seg) {
                Some(child) => node = child,
                None => return node,
            }
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RemoteObject;
    use crate::tree::build_tree;

    fn obj(pathname: &str) -> RemoteObject {
        RemoteObject {
            pathname: pathname.to_string(),
            url: format!("http://store.test/b/{}", pathname),
            size: 1,
            uploaded_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    fn segs(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn base_path_collapses_single_wrapper() {
        let tree = build_tree(&[obj("attachments/a/1.png"), obj("attachments/b/2.png")]);
        assert_eq!(compute_base_path(&tree), segs(&["attachments"]));
    }

    #[test]
    fn base_path_empty_for_multiple_top_level_folders() {
        let tree = build_tree(&[obj("a/1.png"), obj("b/2.png")]);
        assert!(compute_base_path(&tree).is_empty());
    }

    #[test]
    fn base_path_stops_at_files() {
        // The wrapper has a file of its own, so descent stops before it.
        let tree = build_tree(&[obj("wrap/loose.png"), obj("wrap/inner/1.png")]);
        assert_eq!(compute_base_path(&tree), segs(&["wrap"]));

        let flat = build_tree(&[obj("loose.png")]);
        assert!(compute_base_path(&flat).is_empty());
    }

    #[test]
    fn base_path_descends_nested_wrappers() {
        let tree = build_tree(&[obj("a/b/c/1.png"), obj("a/b/c/2.png")]);
        assert_eq!(compute_base_path(&tree), segs(&["a", "b", "c"]));
    }

    #[test]
    fn path_validity() {
        let tree = build_tree(&[obj("a/b/1.png")]);
        assert!(is_path_valid(&tree, &[]));
        assert!(is_path_valid(&tree, &segs(&["a", "b"])));
        assert!(!is_path_valid(&tree, &segs(&["a", "x"])));
    }

    #[test]
    fn revalidate_resets_stale_current_path() {
        let mut nav = NavState::default();
        let tree = build_tree(&[obj("attachments/old/1.png"), obj("attachments/keep/2.png")]);
        nav.revalidate(&tree);
        nav.navigate_to(segs(&["attachments", "old"]));

        // "old" disappears on the next listing.
        let tree = build_tree(&[obj("attachments/keep/2.png")]);
        nav.revalidate(&tree);
        assert_eq!(nav.current_path(), segs(&["attachments", "keep"]));
        assert_eq!(nav.base_path(), segs(&["attachments", "keep"]));
    }

    #[test]
    fn current_folder_degrades_to_deepest_reachable() {
        let tree = build_tree(&[obj("a/b/1.png")]);
        let mut nav = NavState::default();
        nav.navigate_to(segs(&["a", "gone", "deeper"]));
        let node = nav.current_folder(&tree);
        assert_eq!(node.name, "a");
    }

    #[test]
    fn up_stops_at_base_path() {
        let tree = build_tree(&[obj("wrap/a/1.png"), obj("wrap/b/2.png")]);
        let mut nav = NavState::default();
        nav.revalidate(&tree);
        nav.navigate_to(segs(&["wrap", "a"]));
        nav.up();
        assert_eq!(nav.current_path(), segs(&["wrap"]));
        nav.up();
        // Already at the smart root; going further would escape the base.
        assert_eq!(nav.current_path(), segs(&["wrap"]));
    }
}
