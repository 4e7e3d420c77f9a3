/// Application state management.
///
/// `AppState` wraps the core `Controller`, which owns everything that talks
/// to the engine, and adds what only the view cares about: the search box,
/// the table sort, pie hover and which dialogs are open. Worker replies are
/// applied in `process_messages()`, once per frame.
use spacescope_core::analysis::PieSlice;
use spacescope_core::config::Config;
use spacescope_core::deletion::DeleteMode;
use spacescope_core::model::{Entry, SortColumn, SortOrder};
use spacescope_core::{Controller, Engine, LocalEngine};
use std::path::PathBuf;
use std::sync::Arc;

/// File name offered in the export dialog before the user types one.
const DEFAULT_EXPORT_NAME: &str = "spacescope-listing.csv";

/// All application state.
pub struct AppState {
    pub controller: Controller,

    // ── Table ──────────────────────────────────────────
    pub search: String,
    pub sort_column: SortColumn,
    pub sort_order: SortOrder,

    // ── Chart ──────────────────────────────────────────
    /// Index into the current `chart()` slices under the pointer.
    pub hovered_slice: Option<usize>,

    // ── Dialogs ────────────────────────────────────────
    /// Mode preselected in the confirmation dialog.
    pub confirm_mode: DeleteMode,
    pub show_export: bool,
    pub export_path: String,
    pub show_about: bool,

    // ── UI ─────────────────────────────────────────────
    pub dark_mode: bool,
}

impl AppState {
    pub fn new(engine: Arc<dyn Engine>) -> Self {
        Self::from_controller(Controller::new(engine))
    }

    /// Local filesystem engine, tuned by `config`.
    pub fn from_config(config: &Config) -> Self {
        let engine = Arc::new(LocalEngine::new(config.scan.to_options()));
        Self::from_controller(Controller::new(engine).with_ui_config(&config.ui))
    }

    fn from_controller(controller: Controller) -> Self {
        let confirm_mode = controller.default_delete_mode();
        Self {
            controller,
            search: String::new(),
            sort_column: SortColumn::Size,
            sort_order: SortColumn::Size.default_order(),
            hovered_slice: None,
            confirm_mode,
            show_export: false,
            export_path: DEFAULT_EXPORT_NAME.to_string(),
            show_about: false,
            dark_mode: true,
        }
    }

    /// Apply worker replies. Returns `true` when the view changed.
    pub fn process_messages(&mut self) -> bool {
        let changed = self.controller.process_messages();
        if changed {
            self.hovered_slice = None;
        }
        changed
    }

    pub fn is_scanning(&self) -> bool {
        self.controller.session().is_running()
    }

    // ── Table ──────────────────────────────────────────

    /// Header click: flip the active column, or switch to its natural order.
    pub fn set_sort(&mut self, column: SortColumn) {
        if self.sort_column == column {
            self.sort_order = self.sort_order.flipped();
        } else {
            self.sort_column = column;
            self.sort_order = column.default_order();
        }
    }

    /// Rows to display: the listing filtered by the search box and sorted.
    pub fn visible_entries(&self) -> Vec<&Entry> {
        self.controller
            .listing()
            .view(&self.search, self.sort_column, self.sort_order)
    }

    /// Open a directory row. Clears the search so the new listing shows fully.
    pub fn open(&mut self, id: &str) {
        let is_dir = self
            .controller
            .listing()
            .get(id)
            .is_some_and(Entry::is_dir);
        if is_dir {
            self.search.clear();
            self.controller.open_entry(id);
        }
    }

    pub fn navigate_up(&mut self) {
        self.search.clear();
        self.controller.navigate_up();
    }

    // ── Volumes / scan ─────────────────────────────────

    pub fn browse_volume(&mut self, path: PathBuf) {
        self.search.clear();
        self.controller.select_root(path);
    }

    pub fn scan_volume(&mut self, path: PathBuf) {
        tracing::info!("Scan requested for {}", path.display());
        self.search.clear();
        self.controller.start_scan(path);
    }

    // ── Deletion ───────────────────────────────────────

    pub fn request_delete(&mut self, id: &str) {
        self.confirm_mode = self.controller.default_delete_mode();
        self.controller.request_delete(id);
    }

    pub fn request_delete_selected(&mut self) {
        self.confirm_mode = self.controller.default_delete_mode();
        self.controller.request_delete_selected();
    }

    pub fn confirm_delete(&mut self) {
        let mode = self.confirm_mode;
        self.controller.confirm_delete(mode);
    }

    // ── Chart ──────────────────────────────────────────

    pub fn chart(&self) -> Vec<PieSlice> {
        self.controller.chart()
    }

    // ── Export ─────────────────────────────────────────

    pub fn open_export(&mut self) {
        if let Some(dir) = self.controller.current_path() {
            if let Some(name) = dir.file_name() {
                self.export_path = format!("{}.csv", name.to_string_lossy());
            }
        }
        self.show_export = true;
    }

    pub fn export(&mut self) {
        let path = PathBuf::from(self.export_path.trim());
        if path.as_os_str().is_empty() {
            return;
        }
        tracing::debug!("Exporting listing to {}", path.display());
        self.controller.export_listing(&path);
        self.show_export = false;
    }
}
