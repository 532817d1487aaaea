//! Explorer view controller: navigation state plus the two renderings (grid
//! with breadcrumb, flat expandable tree) over one in-memory folder tree.
//!
//! The state is UI-framework-free: it produces view-models and action
//! payloads; a thin adapter (the TUI shell here) binds them to real input
//! events. After any mutating action the caller re-lists and installs the
//! fresh tree wholesale; nothing is patched in place.

use std::collections::HashSet;

use crate::model::{RemoteObject, ViewMode};
use crate::nav::NavState;
use crate::naming::is_image;
use crate::tree::{FolderNode, build_tree};

mod dropzone;
mod viewmodel;

pub use self::dropzone::DropZone;
pub use self::viewmodel::{Crumb, GridModel, ListModel, ListRow, Tile};

pub struct ExplorerState {
    tree: FolderNode,
    nav: NavState,
    mode: ViewMode,

    /// Expanded folder paths in list mode, keyed by slash-joined path. The
    /// empty key is the synthetic root.
    expanded: HashSet<String>,

    // Monotonic request tokens so a slow refresh that completes after a newer
    // one cannot install a stale tree (last-listing-wins).
    next_token: u64,
    installed_token: u64,

    has_listing: bool,
}

fn join_key(path: &[String]) -> String {
    path.join("/")
}

impl ExplorerState {
    pub fn new(mode: ViewMode) -> Self {
        Self {
            tree: FolderNode::default(),
            nav: NavState::default(),
            mode,
            expanded: HashSet::new(),
            next_token: 0,
            installed_token: 0,
            has_listing: false,
        }
    }

    pub fn tree(&self) -> &FolderNode {
        &self.tree
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        };
    }

    /// True once any listing has been installed; before that the view shows
    /// an empty placeholder instead of last-known-good content.
    pub fn has_listing(&self) -> bool {
        self.has_listing
    }

    pub fn current_path(&self) -> &[String] {
        self.nav.current_path()
    }

    pub fn base_path(&self) -> &[String] {
        self.nav.base_path()
    }

    /// Hand out a token for a refresh that is about to start.
    pub fn begin_refresh(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }

    /// Install a completed listing. Returns false (and changes nothing) when
    /// a newer listing already landed. A failed refresh simply never calls
    /// this, so the previous tree stays intact.
    pub fn install_listing(&mut self, token: u64, objects: &[RemoteObject]) -> bool {
        if token <= self.installed_token {
            return false;
        }
        self.installed_token = token;
        self.tree = build_tree(objects);
        self.nav.revalidate(&self.tree);
        self.reset_expansion();
        self.has_listing = true;
        true
    }

    /// Expand the wrapper chain down to and including the smart root; all
    /// deeper folders start collapsed.
    fn reset_expansion(&mut self) {
        self.expanded.clear();
        let base = self.nav.base_path();
        for i in 0..=base.len() {
            self.expanded.insert(join_key(&base[..i]));
        }
    }

    pub fn navigate_to(&mut self, path: Vec<String>) {
        self.nav.navigate_to(path);
    }

    pub fn up(&mut self) {
        self.nav.up();
    }

    pub fn home(&mut self) {
        self.nav.home();
    }

    pub fn current_folder(&self) -> &FolderNode {
        self.nav.current_folder(&self.tree)
    }

    pub fn is_expanded(&self, path: &[String]) -> bool {
        self.expanded.contains(&join_key(path))
    }

    pub fn toggle_expanded(&mut self, path: &[String]) {
        let key = join_key(path);
        if !self.expanded.remove(&key) {
            self.expanded.insert(key);
        }
    }

    /// Clipboard payload for the plain-URL action.
    pub fn copy_url(&self, object: &RemoteObject) -> String {
        object.url.clone()
    }

    /// Clipboard payload for the markdown action: an image embed for image
    /// types, a plain link otherwise.
    pub fn markdown_ref(&self, object: &RemoteObject) -> String {
        if is_image(&object.pathname) {
            format!("![{}]({})", object.display_name(), object.url)
        } else {
            format!("[{}]({})", object.display_name(), object.url)
        }
    }
}

/// Human-readable byte count for tiles and rows.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obj(pathname: &str) -> RemoteObject {
        RemoteObject {
            pathname: pathname.to_string(),
            url: format!("http://store.test/b/{}", pathname),
            size: 2048,
            uploaded_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn install_listing_discards_stale_tokens() {
        let mut state = ExplorerState::new(ViewMode::Grid);
        let slow = state.begin_refresh();
        let fast = state.begin_refresh();

        assert!(state.install_listing(fast, &[obj("a/new.png")]));
        // The slower, older refresh completes afterwards and must lose.
        assert!(!state.install_listing(slow, &[obj("a/old.png")]));
        assert_eq!(state.tree().child("a").unwrap().files[0].pathname, "a/new.png");
    }

    #[test]
    fn install_resets_expansion_to_smart_root() {
        let mut state = ExplorerState::new(ViewMode::List);
        let t = state.begin_refresh();
        state.install_listing(t, &[obj("wrap/a/1.png"), obj("wrap/b/2.png")]);

        assert!(state.is_expanded(&[]));
        assert!(state.is_expanded(&["wrap".to_string()]));
        assert!(!state.is_expanded(&["wrap".to_string(), "a".to_string()]));

        state.toggle_expanded(&["wrap".to_string(), "a".to_string()]);
        assert!(state.is_expanded(&["wrap".to_string(), "a".to_string()]));
        state.toggle_expanded(&["wrap".to_string(), "a".to_string()]);
        assert!(!state.is_expanded(&["wrap".to_string(), "a".to_string()]));
    }

    #[test]
    fn failed_refresh_keeps_last_known_good() {
        let mut state = ExplorerState::new(ViewMode::Grid);
        let t = state.begin_refresh();
        state.install_listing(t, &[obj("a/1.png")]);

        // A refresh that errors out never installs; the old tree survives.
        let _aborted = state.begin_refresh();
        assert!(state.has_listing());
        assert_eq!(state.tree().child("a").unwrap().files.len(), 1);
    }

    #[test]
    fn markdown_ref_distinguishes_images() {
        let state = ExplorerState::new(ViewMode::Grid);
        let image = obj("a/pic.png");
        let doc = obj("a/notes.pdf");
        assert_eq!(
            state.markdown_ref(&image),
            "![pic.png](http://store.test/b/a/pic.png)"
        );
        assert_eq!(
            state.markdown_ref(&doc),
            "[notes.pdf](http://store.test/b/a/notes.pdf)"
        );
    }

    #[test]
    fn format_size_picks_sensible_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }
}
