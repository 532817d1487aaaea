//! Folder tree reconstruction from flat listings.
//!
//! The remote store is flat; folders exist only as pathname prefixes. Every
//! listing is turned into a fresh tree here and the previous tree is replaced
//! wholesale, which is the whole consistency story: no in-place patching, no
//! cached counts that can go stale.

use crate::model::RemoteObject;

/// A synthetic directory. `name` is a single path segment (empty only for the
/// root); `children` and `files` are kept sorted by [`build_tree`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FolderNode {
    pub name: String,
    pub children: Vec<FolderNode>,
    pub files: Vec<RemoteObject>,
}

impl FolderNode {
    fn child_mut(&mut self, name: &str) -> &mut FolderNode {
        // Create-on-miss, matched by exact name equality.
        if let Some(idx) = self.children.iter().position(|c| c.name == name) {
            return &mut self.children[idx];
        }
        self.children.push(FolderNode {
            name: name.to_string(),
            ..FolderNode::default()
        });
        self.children.last_mut().unwrap()
    }

    pub fn child(&self, name: &str) -> Option<&FolderNode> {
        self.children.iter().find(|c| c.name == name)
    }
}

/// Build a folder tree from a flat object list. The final pathname segment is
/// the file name; all preceding segments form the folder chain from the root.
/// Empty segments (double slashes) are treated as literal segments, and a
/// slashless pathname lands directly under the synthetic root.
pub fn build_tree(objects: &[RemoteObject]) -> FolderNode {
    let mut root = FolderNode::default();

    for object in objects {
        let mut segments: Vec<&str> = object.pathname.split('/').collect();
        // Splitting always yields at least one element.
        let _file_name = segments.pop().unwrap_or("");

        let mut node = &mut root;
        for seg in segments {
            node = node.child_mut(seg);
        }
        node.files.push(object.clone());
    }

    sort_node(&mut root);
    root
}

fn sort_node(node: &mut FolderNode) {
    node.children.sort_by(|a, b| a.name.cmp(&b.name));
    node.files.sort_by(|a, b| a.pathname.cmp(&b.pathname));
    for child in &mut node.children {
        sort_node(child);
    }
}

/// Recursive file count: own files plus all descendants'. Recomputed on every
/// call so it can never disagree with the tree.
pub fn count_files(node: &FolderNode) -> usize {
    node.files.len() + node.children.iter().map(count_files).sum::<usize>()
}

/// Walk from `root` following each segment by exact name; `None` as soon as a
/// segment fails to resolve.
pub fn find_node<'a>(root: &'a FolderNode, path: &[String]) -> Option<&'a FolderNode> {
    let mut node = root;
    for seg in path {
        node = node.child(seg)?;
    }
    Some(node)
}
