//! View-models for the two explorer renderings.

use super::{ExplorerState, join_key};
use crate::model::RemoteObject;
use crate::naming::is_image;
use crate::tree::{FolderNode, count_files};

/// One breadcrumb segment. `path` is the absolute folder path to navigate to
/// when the crumb is activated; the final crumb is inert (`current`).
#[derive(Clone, Debug, PartialEq)]
pub struct Crumb {
    pub label: String,
    pub path: Vec<String>,
    pub current: bool,
}

/// One tile in grid mode. Folders come first, then files.
#[derive(Clone, Debug)]
pub enum Tile {
    Folder {
        name: String,
        /// Absolute path; also the drop-target binding for this tile.
        path: Vec<String>,
        count: usize,
    },
    File {
        object: RemoteObject,
        is_image: bool,
    },
}

#[derive(Debug)]
pub struct GridModel {
    pub crumbs: Vec<Crumb>,
    pub tiles: Vec<Tile>,
}

/// One row in list mode, indented by `depth`.
#[derive(Clone, Debug)]
pub enum ListRow {
    Folder {
        name: String,
        path: Vec<String>,
        depth: usize,
        count: usize,
        expanded: bool,
    },
    File {
        object: RemoteObject,
        depth: usize,
    },
}

#[derive(Debug)]
pub struct ListModel {
    pub rows: Vec<ListRow>,
}

impl ExplorerState {
    /// Grid rendering: breadcrumb for the current path relative to the smart
    /// root, then the current folder's immediate children (subfolders first,
    /// then files).
    pub fn grid_model(&self) -> GridModel {
        let base = self.base_path();
        let current = self.current_path();

        let mut crumbs = vec![Crumb {
            label: "~".to_string(),
            path: base.to_vec(),
            current: current == base,
        }];
        for i in base.len()..current.len() {
            crumbs.push(Crumb {
                label: current[i].clone(),
                path: current[..=i].to_vec(),
                current: i + 1 == current.len(),
            });
        }

        let folder = self.current_folder();
        let mut tiles = Vec::new();
        for child in &folder.children {
            let mut path = current.to_vec();
            path.push(child.name.clone());
            tiles.push(Tile::Folder {
                name: child.name.clone(),
                path,
                count: count_files(child),
            });
        }
        for file in &folder.files {
            tiles.push(Tile::File {
                object: file.clone(),
                is_image: is_image(&file.pathname),
            });
        }

        GridModel { crumbs, tiles }
    }

    /// List rendering: the entire tree (current path is ignored) as nested
    /// rows; collapsed folders hide their descendants.
    pub fn list_model(&self) -> ListModel {
        let mut rows = Vec::new();
        let mut path = Vec::new();
        self.flatten(self.tree(), &mut path, 0, &mut rows);
        ListModel { rows }
    }

    fn flatten(
        &self,
        node: &FolderNode,
        path: &mut Vec<String>,
        depth: usize,
        rows: &mut Vec<ListRow>,
    ) {
        for child in &node.children {
            path.push(child.name.clone());
            let expanded = self.expanded.contains(&join_key(path));
            rows.push(ListRow::Folder {
                name: child.name.clone(),
                path: path.clone(),
                depth,
                count: count_files(child),
                expanded,
            });
            if expanded {
                self.flatten(child, path, depth + 1, rows);
            }
            path.pop();
        }
        for file in &node.files {
            rows.push(ListRow::File {
                object: file.clone(),
                depth,
            });
        }
    }
}
