//! TUI application state: landing page, viewer page and the session behind them.

use std::path::PathBuf;

use crate::io::export::EXPORT_FILE_NAME;
use crate::library::{JsonFileEntry, JsonLibrary};
use crate::model::Category;
use crate::scene::Scene;
use crate::session::{PlantSource, ViewerSession};
use crate::store::SlotStore;

/// Which page is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Library list plus the last error.
    Landing,
    /// Plan view of the current plant.
    Viewer,
}

/// TUI application state.
pub struct App {
    /// Page currently drawn.
    pub screen: Screen,
    /// Current plant and visibility.
    pub session: ViewerSession,
    library: JsonLibrary,
    store: Box<dyn SlotStore>,
    /// Library entries shown on the landing page.
    pub files: Vec<JsonFileEntry>,
    /// Highlighted entry in `files`.
    pub selected: usize,
    /// Last load or export failure, shown until the next action.
    pub error: Option<String>,
    /// Last informational message.
    pub status: Option<String>,
    /// Whether the metadata panel is open.
    pub show_metadata: bool,
    /// Whether the controls panel is folded to its title.
    pub controls_collapsed: bool,
    /// Whether the user has requested quit.
    pub quit: bool,
    /// Path being typed for a local file load; `None` when the prompt is closed.
    pub upload_input: Option<String>,
    export_path: PathBuf,
}

impl App {
    /// Creates the app, lists the library and reads the storage slot once.
    pub fn new(library: JsonLibrary, store: Box<dyn SlotStore>, session: ViewerSession) -> Self {
        let mut app = Self {
            screen: Screen::Landing,
            session,
            library,
            store,
            files: Vec::new(),
            selected: 0,
            error: None,
            status: None,
            show_metadata: false,
            controls_collapsed: false,
            quit: false,
            upload_input: None,
            export_path: PathBuf::from(EXPORT_FILE_NAME),
        };
        app.refresh_files();
        match app.session.restore(&*app.store) {
            Ok(Some(loaded)) => {
                app.status = Some(format!("Restored {}; press v to view", loaded.label));
            }
            Ok(None) => {}
            Err(e) => app.error = Some(e.to_string()),
        }
        app
    }

    /// Sets where `e` writes the exported document.
    pub fn with_export_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.export_path = path.into();
        self
    }

    /// Re-reads the library directory.
    pub fn refresh_files(&mut self) {
        match self.library.list() {
            Ok(files) => self.files = files,
            Err(e) => {
                self.files.clear();
                self.error = Some(format!("Failed to fetch file list: {e}"));
            }
        }
        if self.selected >= self.files.len() {
            self.selected = self.files.len().saturating_sub(1);
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.files.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Loads `source` and switches to the viewer on success.
    ///
    /// On failure the landing page stays up with the error and the previous
    /// plant is kept.
    pub fn open(&mut self, source: &PlantSource) {
        self.status = None;
        match self
            .session
            .load(source, &self.library, &mut *self.store)
        {
            Ok(loaded) => {
                self.error = None;
                self.status = Some(format!("Loaded {}", loaded.label));
                self.screen = Screen::Viewer;
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.screen = Screen::Landing;
            }
        }
    }

    /// Loads the highlighted library entry.
    pub fn open_selected(&mut self) {
        let Some(entry) = self.files.get(self.selected) else {
            return;
        };
        let source = PlantSource::Library(entry.path.clone());
        self.open(&source);
    }

    /// Opens the path prompt for loading a local file.
    pub fn begin_upload(&mut self) {
        self.upload_input = Some(String::new());
    }

    pub fn push_upload_char(&mut self, c: char) {
        if let Some(input) = self.upload_input.as_mut() {
            input.push(c);
        }
    }

    pub fn pop_upload_char(&mut self) {
        if let Some(input) = self.upload_input.as_mut() {
            input.pop();
        }
    }

    pub fn cancel_upload(&mut self) {
        self.upload_input = None;
    }

    /// Closes the prompt and loads the typed path. An empty path does nothing.
    pub fn submit_upload(&mut self) {
        let Some(input) = self.upload_input.take() else {
            return;
        };
        let path = input.trim();
        if path.is_empty() {
            return;
        }
        self.open(&PlantSource::Upload(PathBuf::from(path)));
    }

    /// Shows the viewer for the plant already in the session, if any.
    pub fn view_current(&mut self) {
        if self.session.current().is_some() {
            self.screen = Screen::Viewer;
        } else {
            self.error = Some("No plant data loaded".to_string());
        }
    }

    /// Returns to the landing page.
    pub fn back(&mut self) {
        self.screen = Screen::Landing;
        self.show_metadata = false;
    }

    pub fn toggle(&mut self, category: Category) {
        let visible = self.session.toggle(category);
        let state = if visible { "shown" } else { "hidden" };
        self.status = Some(format!("{category} {state}"));
    }

    pub fn toggle_metadata(&mut self) {
        self.show_metadata = !self.show_metadata;
    }

    pub fn toggle_controls(&mut self) {
        self.controls_collapsed = !self.controls_collapsed;
    }

    /// Writes the current document to the export path.
    pub fn export(&mut self) {
        match self.session.export_to_path(&self.export_path) {
            Ok(()) => {
                self.error = None;
                self.status = Some(format!("Exported to {}", self.export_path.display()));
            }
            Err(e) => self.error = Some(format!("Export failed: {e}")),
        }
    }

    /// Composes the scene for the current frame.
    pub fn scene(&self) -> Scene {
        self.session.scene()
    }
}
