/// End-to-end tests for `AppState` -- the GUI application state.
///
/// These tests exercise the view-side state (search, sort, dialogs, chart
/// hover) on top of a real `Controller` without spinning up an egui window.
/// Most use an in-memory engine; the last ones use `LocalEngine` on a
/// temporary directory.
use spacescope_core::config::Config;
use spacescope_core::deletion::DeleteMode;
use spacescope_core::engine::{ScanEvent, ScanProgress, ScanSink};
use spacescope_core::error::{EngineError, Result};
use spacescope_core::model::{DriveDescriptor, Entry, SortColumn, SortOrder};
use spacescope_core::Engine;
use spacescope_gui::state::AppState;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

// ── Helpers ───────────────────────────────────────────────────────────────────

#[derive(Default)]
struct FakeEngine {
    listings: HashMap<PathBuf, Vec<Entry>>,
    sinks: Mutex<Vec<ScanSink>>,
}

impl Engine for FakeEngine {
    fn list_volumes(&self) -> Result<Vec<DriveDescriptor>> {
        Ok(vec![DriveDescriptor::from_capacity("Data", "/r", 1000, 400)])
    }

    fn list_directory(&self, path: &Path) -> Result<Vec<Entry>> {
        self.listings
            .get(path)
            .cloned()
            .ok_or_else(|| EngineError::NotFound(path.to_path_buf()))
    }

    fn start_scan(&self, _root: &Path, sink: ScanSink) -> Result<()> {
        self.sinks.lock().unwrap().push(sink);
        Ok(())
    }

    fn delete_entry(&self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn trash_entry(&self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

fn fake_engine() -> Arc<FakeEngine> {
    let mut engine = FakeEngine::default();
    engine.listings.insert(
        PathBuf::from("/r"),
        vec![
            Entry::directory("/r/Music", 700),
            Entry::directory("/r/photos", 500),
            Entry::file("/r/notes.txt", 20),
        ],
    );
    engine.listings.insert(
        PathBuf::from("/r/photos"),
        vec![
            Entry::file("/r/photos/b.png", 300),
            Entry::file("/r/photos/a.jpg", 200),
            Entry::file("/r/photos/c.PNG", 0),
        ],
    );
    Arc::new(engine)
}

fn pump_until(state: &mut AppState, what: &str, done: impl Fn(&AppState) -> bool) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while !done(state) {
        assert!(Instant::now() < deadline, "timed out waiting for {what}");
        state.process_messages();
        std::thread::sleep(Duration::from_millis(5));
    }
}

/// State browsing `/r/photos`, a child of the root `/r`.
fn browsing_photos() -> AppState {
    let mut state = AppState::new(fake_engine());
    state.browse_volume(PathBuf::from("/r"));
    pump_until(&mut state, "root listing", |s| s.controller.listing().len() == 3);
    state.open("/r/photos");
    pump_until(&mut state, "photos listing", |s| {
        s.controller.current_path() == Some(Path::new("/r/photos"))
            && !s.controller.navigator().is_loading()
    });
    state
}

fn names(state: &AppState) -> Vec<String> {
    state
        .visible_entries()
        .iter()
        .map(|e| e.name.to_string())
        .collect()
}

// ── Sorting ───────────────────────────────────────────────────────────────────

/// Rows start sorted by size, largest first.
#[test]
fn default_sort_is_size_descending() {
    let state = browsing_photos();
    assert_eq!(state.sort_column, SortColumn::Size);
    assert_eq!(state.sort_order, SortOrder::Descending);
    assert_eq!(names(&state), ["b.png", "a.jpg", "c.PNG"]);
}

/// Clicking the active column flips it; another column takes its natural order.
#[test]
fn header_clicks_flip_or_switch_column() {
    let mut state = browsing_photos();

    state.set_sort(SortColumn::Size);
    assert_eq!(state.sort_order, SortOrder::Ascending);
    assert_eq!(names(&state), ["c.PNG", "a.jpg", "b.png"]);

    state.set_sort(SortColumn::Name);
    assert_eq!(state.sort_column, SortColumn::Name);
    assert_eq!(state.sort_order, SortOrder::Ascending);
    assert_eq!(names(&state), ["a.jpg", "b.png", "c.PNG"]);

    state.set_sort(SortColumn::Modified);
    assert_eq!(state.sort_order, SortOrder::Descending);
}

// ── Search ────────────────────────────────────────────────────────────────────

/// Filtering is case-insensitive and never touches the listing or selection.
#[test]
fn search_filters_view_only() {
    let mut state = browsing_photos();
    state.controller.toggle_selection("/r/photos/a.jpg");

    state.search = "  png ".into();
    assert_eq!(names(&state), ["b.png", "c.PNG"]);
    assert_eq!(state.controller.listing().len(), 3);
    assert!(state.controller.selection().contains("/r/photos/a.jpg"));

    state.search = "zzz".into();
    assert!(state.visible_entries().is_empty());
    assert_eq!(state.chart().len(), 3, "chart ignores the search box");
}

/// Navigating clears the search so the next folder shows in full.
#[test]
fn navigation_clears_search() {
    let mut state = AppState::new(fake_engine());
    state.browse_volume(PathBuf::from("/r"));
    pump_until(&mut state, "root listing", |s| s.controller.listing().len() == 3);

    state.search = "pho".into();
    state.open("/r/photos");
    assert!(state.search.is_empty());

    pump_until(&mut state, "photos listing", |s| {
        s.controller.current_path() == Some(Path::new("/r/photos"))
    });
    state.search = "a".into();
    state.navigate_up();
    assert!(state.search.is_empty());
}

/// Opening a file row is a no-op and keeps the filter.
#[test]
fn opening_a_file_keeps_everything() {
    let mut state = browsing_photos();
    state.search = "a".into();
    state.open("/r/photos/a.jpg");
    assert_eq!(state.search, "a");
    assert_eq!(state.controller.current_path(), Some(Path::new("/r/photos")));
}

// ── Deletion dialog ───────────────────────────────────────────────────────────

/// Every request preselects the configured default mode.
#[test]
fn delete_request_preselects_default_mode() {
    let mut state = browsing_photos();
    state.confirm_mode = DeleteMode::Permanent;

    state.request_delete("/r/photos/a.jpg");
    assert_eq!(state.confirm_mode, DeleteMode::Trash);
    let pending = state.controller.deletion().pending().map(|b| b.len());
    assert_eq!(pending, Some(1));

    state.controller.cancel_delete();
    assert!(state.controller.deletion().is_idle());
}

/// Confirming runs the batch in the chosen mode and refreshes the folder.
#[test]
fn confirm_runs_in_chosen_mode() {
    let mut state = browsing_photos();
    state.controller.toggle_selection("/r/photos/a.jpg");
    state.controller.toggle_selection("/r/photos/b.png");
    state.request_delete_selected();
    state.confirm_mode = DeleteMode::Permanent;
    state.confirm_delete();

    pump_until(&mut state, "batch to finish", |s| {
        s.controller.deletion().is_idle() && !s.controller.navigator().is_loading()
    });
    assert!(state.controller.selection().is_empty());
    assert!(state
        .controller
        .notifications()
        .iter()
        .any(|n| n.message.starts_with("Deleted 2 items")));
}

// ── Scan & chart ──────────────────────────────────────────────────────────────

/// The chart is hidden while scanning and appears with the results.
#[test]
fn chart_follows_scan_lifecycle() {
    let engine = fake_engine();
    let mut state = AppState::new(engine.clone());
    state.scan_volume(PathBuf::from("/r"));
    assert!(state.is_scanning());
    assert!(state.chart().is_empty());

    let sink = engine.sinks.lock().unwrap().pop().unwrap();
    sink.send(ScanEvent::Progress(ScanProgress {
        current_path: PathBuf::from("/r/photos"),
        files_scanned: 2,
        progress: 50.0,
    }))
    .unwrap();
    sink.send(ScanEvent::Complete(vec![
        Entry::directory("/r/photos", 300),
        Entry::file("/r/notes.txt", 100),
    ]))
    .unwrap();

    pump_until(&mut state, "scan completion", |s| !s.is_scanning());
    let chart = state.chart();
    assert_eq!(chart.len(), 2);
    assert_eq!(chart[0].name, "photos");
    assert!((chart[0].percentage - 75.0).abs() < 1e-9);
}

/// Applying new messages drops a stale hover index.
#[test]
fn hover_resets_when_view_changes() {
    let mut state = AppState::new(fake_engine());
    state.hovered_slice = Some(4);
    state.browse_volume(PathBuf::from("/r"));
    pump_until(&mut state, "root listing", |s| s.controller.listing().len() == 3);
    assert_eq!(state.hovered_slice, None);
}

// ── Local filesystem ──────────────────────────────────────────────────────────

/// `from_config` drives the real engine: browse a temp folder, then export it.
#[test]
fn local_browse_and_export() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir(tmp.path().join("media")).unwrap();
    fs::write(tmp.path().join("media").join("clip.mp4"), vec![0u8; 4000]).unwrap();
    fs::write(tmp.path().join("readme.md"), vec![0u8; 100]).unwrap();

    let mut state = AppState::from_config(&Config::default());
    state.browse_volume(tmp.path().to_path_buf());
    pump_until(&mut state, "local listing", |s| s.controller.listing().len() == 2);
    assert_eq!(names(&state), ["media", "readme.md"]);

    let out = tmp.path().join("listing.json");
    state.open_export();
    assert!(state.show_export);
    state.export_path = out.display().to_string();
    state.export();

    assert!(!state.show_export);
    let json = fs::read_to_string(&out).unwrap();
    assert!(json.contains("\"media\""));
    assert!(json.contains("\"readme.md\""));
}

/// The default export name follows the folder being browsed.
#[test]
fn export_name_follows_current_folder() {
    let mut state = browsing_photos();
    state.open_export();
    assert_eq!(state.export_path, "photos.csv");
}
