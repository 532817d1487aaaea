use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::explorer::{ExplorerState, ListRow, Tile};
use crate::model::{RemoteObject, ViewMode};
use crate::remote::StoreClient;
use crate::store::LocalStore;
use crate::upload::upload_many;

use super::modal::{InputAction, Modal, PendingAction};
use super::views;

/// What the selection cursor currently points at, resolved from the active
/// view-model.
#[derive(Clone, Debug)]
pub(super) enum Item {
    Folder { path: Vec<String> },
    File { object: RemoteObject },
}

pub(super) struct StatusLine {
    pub(super) text: String,
    pub(super) is_error: bool,
}

pub(super) struct App {
    pub(super) store: Option<LocalStore>,
    pub(super) client: Option<StoreClient>,
    pub(super) load_err: Option<String>,

    pub(super) explorer: ExplorerState,
    pub(super) selected: usize,

    pub(super) status: Option<StatusLine>,
    pub(super) modal: Option<Modal>,

    pub(super) quit: bool,
}

impl App {
    pub(super) fn load() -> Self {
        let mut app = Self {
            store: None,
            client: None,
            load_err: None,
            explorer: ExplorerState::new(ViewMode::Grid),
            selected: 0,
            status: None,
            modal: None,
            quit: false,
        };

        let cwd = match std::env::current_dir() {
            Ok(d) => d,
            Err(err) => {
                app.load_err = Some(format!("get current dir: {}", err));
                return app;
            }
        };
        let store = match LocalStore::discover(&cwd) {
            Ok(s) => s,
            Err(err) => {
                app.load_err = Some(format!("{:#}", err));
                return app;
            }
        };

        match store.read_config() {
            Ok(cfg) => match cfg.store {
                Some(settings) => {
                    app.explorer.set_mode(settings.view_mode);
                    match StoreClient::new(settings) {
                        Ok(client) => app.client = Some(client),
                        Err(err) => app.load_err = Some(err.to_string()),
                    }
                }
                None => {
                    app.load_err = Some(
                        "remote store is not configured (run `blobdock login --url ... --token ...`)"
                            .to_string(),
                    );
                }
            },
            Err(err) => app.load_err = Some(format!("{:#}", err)),
        }

        app.store = Some(store);
        app.refresh();
        app
    }

    pub(super) fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine {
            text: text.into(),
            is_error: false,
        });
    }

    pub(super) fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine {
            text: text.into(),
            is_error: true,
        });
    }

    /// Full re-list and wholesale tree install. On failure the previous tree
    /// stays; the error lands in the status line.
    pub(super) fn refresh(&mut self) {
        let Some(client) = &self.client else {
            return;
        };
        let token = self.explorer.begin_refresh();
        match client.list(None) {
            Ok(objects) => {
                if self.explorer.install_listing(token, &objects) {
                    self.clamp_selection();
                }
            }
            Err(err) => self.set_error(format!("refresh failed: {:#}", err)),
        }
    }

    /// Items the cursor can land on, in render order of the active mode.
    pub(super) fn items(&self) -> Vec<Item> {
        match self.explorer.mode() {
            ViewMode::Grid => self
                .explorer
                .grid_model()
                .tiles
                .into_iter()
                .map(|tile| match tile {
                    Tile::Folder { path, .. } => Item::Folder { path },
                    Tile::File { object, .. } => Item::File { object },
                })
                .collect(),
            ViewMode::List => self
                .explorer
                .list_model()
                .rows
                .into_iter()
                .map(|row| match row {
                    ListRow::Folder { path, .. } => Item::Folder { path },
                    ListRow::File { object, .. } => Item::File { object },
                })
                .collect(),
        }
    }

    fn selected_item(&self) -> Option<Item> {
        let items = self.items();
        items.get(self.selected.min(items.len().saturating_sub(1))).cloned()
    }

    fn clamp_selection(&mut self) {
        let len = self.items().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn move_down(&mut self) {
        let len = self.items().len();
        if len == 0 {
            self.selected = 0;
        } else {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    fn open_selected(&mut self) {
        match self.selected_item() {
            Some(Item::Folder { path }) => match self.explorer.mode() {
                ViewMode::Grid => {
                    self.explorer.navigate_to(path);
                    self.selected = 0;
                }
                ViewMode::List => self.explorer.toggle_expanded(&path),
            },
            Some(Item::File { object }) => {
                let url = self.explorer.copy_url(&object);
                self.set_status(format!("url: {}", url));
            }
            None => {}
        }
    }

    fn toggle_view_mode(&mut self) {
        self.explorer.toggle_mode();
        self.selected = 0;
        self.persist_view_mode();
    }

    fn persist_view_mode(&mut self) {
        let Some(store) = &self.store else {
            return;
        };
        let mode = self.explorer.mode();
        let res = store.read_config().and_then(|mut cfg| {
            if let Some(settings) = cfg.store.as_mut() {
                settings.view_mode = mode;
                store.write_config(&cfg)?;
            }
            Ok(())
        });
        if let Err(err) = res {
            self.set_error(format!("save view mode: {:#}", err));
        }
    }

    fn copy_action(&mut self, markdown: bool) {
        match self.selected_item() {
            Some(Item::File { object }) => {
                let payload = if markdown {
                    self.explorer.markdown_ref(&object)
                } else {
                    self.explorer.copy_url(&object)
                };
                self.set_status(format!("copy: {}", payload));
            }
            _ => self.set_status("select a file first"),
        }
    }

    fn confirm_delete(&mut self) {
        match self.selected_item() {
            Some(Item::File { object }) => {
                self.modal = Some(Modal::Confirm {
                    message: format!("Delete {}?", object.pathname),
                    action: PendingAction::Delete {
                        url: object.url.clone(),
                        pathname: object.pathname.clone(),
                    },
                });
            }
            _ => self.set_status("select a file first"),
        }
    }

    pub(super) fn run_delete(&mut self, url: &str, pathname: &str) {
        let Some(client) = &self.client else {
            return;
        };
        match client.delete(url) {
            Ok(()) => {
                self.set_status(format!("deleted {}", pathname));
                self.refresh();
            }
            Err(err) => self.set_error(format!("delete failed: {:#}", err)),
        }
    }

    fn prompt_upload(&mut self) {
        // The upload targets the folder under the cursor when there is one,
        // otherwise the folder currently shown in grid mode.
        let target = match self.selected_item() {
            Some(Item::Folder { path }) => path,
            _ => self.explorer.current_path().to_vec(),
        };
        self.modal = Some(Modal::Input {
            prompt: format!("upload files into /{} (quote paths with spaces):", target.join("/")),
            buf: String::new(),
            action: InputAction::Upload { target },
        });
    }

    pub(super) fn run_upload(&mut self, raw: &str, target: Vec<String>) {
        let Some(client) = &self.client else {
            return;
        };
        let files = split_file_args(raw);
        if files.is_empty() {
            self.set_status("nothing to upload");
            return;
        }
        let report = upload_many(client, &files, Some(&target));
        let failed = report.failed();
        let summary = report.summary();
        if failed > 0 {
            let first = report
                .outcomes
                .iter()
                .find_map(|o| match o {
                    crate::upload::FileOutcome::Failed { error, .. } => Some(error.to_string()),
                    _ => None,
                })
                .unwrap_or_default();
            self.set_error(format!("{} ({})", summary, first));
        } else {
            self.set_status(summary);
        }
        // One refresh per batch, not per file.
        self.refresh();
    }
}

/// Split the upload prompt's input into paths. Whitespace separates entries
/// unless it sits inside single or double quotes, so paths with spaces stay
/// intact.
fn split_file_args(raw: &str) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut quote: Option<char> = None;
    for c in raw.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => cur.push(c),
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c.is_whitespace() => {
                if !cur.is_empty() {
                    out.push(PathBuf::from(std::mem::take(&mut cur)));
                }
            }
            None => cur.push(c),
        }
    }
    if !cur.is_empty() {
        out.push(PathBuf::from(cur));
    }
    out
}

pub(super) fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| views::draw(f, app)).context("draw")?;
        if app.quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(50)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => handle_key(app, k),
                _ => {}
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if app.modal.is_some() {
        super::modal::handle_modal_key(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_down(),
        KeyCode::Enter => app.open_selected(),
        KeyCode::Backspace => {
            if app.explorer.mode() == ViewMode::Grid {
                app.explorer.up();
                app.selected = 0;
            }
        }
        KeyCode::Char('g') => {
            app.explorer.home();
            app.selected = 0;
        }
        KeyCode::Char('v') => app.toggle_view_mode(),
        KeyCode::Char('r') => {
            app.refresh();
            app.set_status("refreshed");
        }
        KeyCode::Char('y') => app.copy_action(false),
        KeyCode::Char('m') => app.copy_action(true),
        KeyCode::Char('d') => app.confirm_delete(),
        KeyCode::Char('u') => app.prompt_upload(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::split_file_args;
    use std::path::PathBuf;

    #[test]
    fn split_separates_on_whitespace() {
        assert_eq!(
            split_file_args("a.png  b.png\tc.png"),
            vec![
                PathBuf::from("a.png"),
                PathBuf::from("b.png"),
                PathBuf::from("c.png")
            ]
        );
        assert!(split_file_args("   ").is_empty());
    }

    #[test]
    fn split_keeps_quoted_spaces() {
        assert_eq!(
            split_file_args(r#""My Shot.png" 'second file.jpg' plain.gif"#),
            vec![
                PathBuf::from("My Shot.png"),
                PathBuf::from("second file.jpg"),
                PathBuf::from("plain.gif")
            ]
        );
    }

    #[test]
    fn split_handles_quotes_inside_an_entry() {
        assert_eq!(
            split_file_args(r#"shots/"name with spaces".png"#),
            vec![PathBuf::from("shots/name with spaces.png")]
        );
    }
}
