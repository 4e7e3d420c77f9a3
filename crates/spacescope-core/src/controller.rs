/// The orchestrating context.
///
/// `Controller` owns the navigator, the scan session, the selection, the
/// delete coordinator and the notification queue, and is the only thing
/// that mutates them. Engine calls run on worker threads which reply on a
/// single channel; `process_messages()` applies the replies once per frame.
use crate::analysis::{distribution, PieSlice};
use crate::config::UiConfig;
use crate::deletion::{self, BatchOutcome, BatchReport, DeleteCoordinator, DeleteMode};
use crate::engine::Engine;
use crate::error::EngineError;
use crate::export;
use crate::model::size::format_count;
use crate::model::{DriveDescriptor, Entry, Listing};
use crate::navigator::{LoadOutcome, LoadRequest, Navigator};
use crate::selection::{HeaderState, SelectionSet};
use crate::session::{ScanSession, ScanState, SessionUpdate};
use crossbeam_channel::{Receiver, Sender};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Maximum number of worker replies and scan events applied per frame.
///
/// Keeps a backlog (window restored after being hidden) from stalling the
/// render thread.
pub const MAX_MESSAGES_PER_FRAME: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient, one-line outcome message.
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub created: Instant,
}

/// Replies from worker threads.
#[derive(Debug)]
enum Message {
    Volumes(Result<Vec<DriveDescriptor>, EngineError>),
    Listing {
        seq: u64,
        path: PathBuf,
        result: Result<Vec<Entry>, EngineError>,
    },
    BatchProgress {
        completed: usize,
    },
    BatchFinished(BatchReport),
}

pub struct Controller {
    engine: Arc<dyn Engine>,
    tx: Sender<Message>,
    rx: Receiver<Message>,

    // ── Volumes ────────────────────────────────────────
    volumes: Vec<DriveDescriptor>,
    volumes_loading: bool,

    // ── Browsing ───────────────────────────────────────
    navigator: Navigator,
    selection: SelectionSet,

    // ── Scan ───────────────────────────────────────────
    session: ScanSession,
    sessions_started: u64,

    // ── Deletion ───────────────────────────────────────
    deletion: DeleteCoordinator,
    default_delete_mode: DeleteMode,

    // ── Notifications ──────────────────────────────────
    notifications: Vec<Notification>,
    notification_ttl: Duration,
}

impl Controller {
    pub fn new(engine: Arc<dyn Engine>) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        let ui = UiConfig::default();
        Self {
            engine,
            tx,
            rx,
            volumes: Vec::new(),
            volumes_loading: false,
            navigator: Navigator::new(),
            selection: SelectionSet::new(),
            session: ScanSession::idle(),
            sessions_started: 0,
            deletion: DeleteCoordinator::new(),
            default_delete_mode: ui.default_delete_mode,
            notifications: Vec::new(),
            notification_ttl: ui.notification_ttl(),
        }
    }

    pub fn with_ui_config(mut self, ui: &UiConfig) -> Self {
        self.default_delete_mode = ui.default_delete_mode;
        self.notification_ttl = ui.notification_ttl();
        self
    }

    // ── Volumes ────────────────────────────────────────

    pub fn refresh_volumes(&mut self) {
        self.volumes_loading = true;
        let engine = Arc::clone(&self.engine);
        let tx = self.tx.clone();
        let spawned = thread::Builder::new()
            .name("spacescope-volumes".into())
            .spawn(move || {
                let _ = tx.send(Message::Volumes(engine.list_volumes()));
            });
        if let Err(e) = spawned {
            self.volumes_loading = false;
            self.notify(
                NotificationLevel::Error,
                format!("Could not list drives: {e}"),
            );
        }
    }

    // ── Navigation ─────────────────────────────────────

    /// Browse `path` as the new root without scanning it.
    pub fn select_root(&mut self, path: impl Into<PathBuf>) {
        let request = self.navigator.select_root(path);
        self.dispatch_load(request);
    }

    pub fn load(&mut self, path: impl Into<PathBuf>) {
        let request = self.navigator.load(path);
        self.dispatch_load(request);
    }

    pub fn navigate_up(&mut self) {
        if let Some(request) = self.navigator.navigate_up() {
            self.dispatch_load(request);
        }
    }

    /// Open the listing entry `id` if it is a directory.
    pub fn open_entry(&mut self, id: &str) {
        let Some(entry) = self.navigator.listing().get(id).cloned() else {
            return;
        };
        if let Some(request) = self.navigator.open(&entry) {
            self.dispatch_load(request);
        }
    }

    fn dispatch_load(&mut self, request: LoadRequest) {
        let LoadRequest { seq, path } = request;
        debug!("Requesting listing #{seq} for {}", path.display());

        let engine = Arc::clone(&self.engine);
        let tx = self.tx.clone();
        let worker_path = path.clone();
        let spawned = thread::Builder::new()
            .name("spacescope-lister".into())
            .spawn(move || {
                let result = engine.list_directory(&worker_path);
                let _ = tx.send(Message::Listing {
                    seq,
                    path: worker_path,
                    result,
                });
            });
        if let Err(e) = spawned {
            let result = Err(EngineError::io(path.clone(), e));
            self.apply_listing(seq, path, result);
        }
    }

    fn apply_listing(
        &mut self,
        seq: u64,
        path: PathBuf,
        result: Result<Vec<Entry>, EngineError>,
    ) {
        match self.navigator.resolve(seq, path.clone(), result) {
            LoadOutcome::Applied => self.sync_selection(),
            LoadOutcome::Stale => {}
            LoadOutcome::Failed(message) => self.notify(
                NotificationLevel::Error,
                format!("Could not open {}: {message}", path.display()),
            ),
        }
    }

    /// Drop the selection whenever the listing it was built on is replaced.
    fn sync_selection(&mut self) {
        self.selection.rebind(self.navigator.generation());
    }

    // ── Scan ───────────────────────────────────────────

    /// Start a deep scan of `root`, abandoning any scan still running.
    pub fn start_scan(&mut self, root: impl Into<PathBuf>) {
        let root = root.into();

        // Detach the old session before the new one attaches.
        self.session.abandon();
        self.sessions_started += 1;
        let (session, sink) = ScanSession::start(self.sessions_started, root.clone());
        self.session = session;

        self.navigator.begin_scan(root.clone());
        self.sync_selection();

        match self.engine.start_scan(&root, sink) {
            Ok(()) => info!(
                session = self.sessions_started,
                "Scan of {} accepted",
                root.display()
            ),
            Err(e) => {
                self.session.fail(e.to_string());
                self.notify(NotificationLevel::Error, format!("Scan failed: {e}"));
            }
        }
    }

    // ── Frame pump ─────────────────────────────────────

    /// Apply pending worker replies and scan events.
    ///
    /// Returns `true` when anything changed and the view should repaint.
    pub fn process_messages(&mut self) -> bool {
        let mut budget = MAX_MESSAGES_PER_FRAME;
        let mut repaint = false;

        while budget > 0 {
            let Ok(message) = self.rx.try_recv() else {
                break;
            };
            budget -= 1;
            repaint = true;
            self.handle_message(message);
        }

        let was_running = self.session.is_running();
        while budget > 0 {
            let Some(event) = self.session.next_event() else {
                break;
            };
            budget -= 1;
            repaint = true;
            if let SessionUpdate::Completed(entries) = self.session.handle(event) {
                self.finish_scan(entries);
                break;
            }
        }
        if was_running && self.session.state() == ScanState::Failed {
            let message = self.session.error().unwrap_or("Scan failed").to_string();
            self.notify(NotificationLevel::Error, message);
            repaint = true;
        }

        repaint |= self.expire_notifications(Instant::now());
        repaint
    }

    fn finish_scan(&mut self, entries: Vec<Entry>) {
        let Some(root) = self.session.root().map(Path::to_path_buf) else {
            return;
        };
        let count = entries.len();
        self.navigator.install(root.clone(), entries);
        self.sync_selection();

        let elapsed = self
            .session
            .elapsed()
            .map(|d| format!(" in {:.1}s", d.as_secs_f64()))
            .unwrap_or_default();
        self.notify(
            NotificationLevel::Success,
            format!(
                "Scanned {} ({} files, {} entries){elapsed}",
                root.display(),
                format_count(self.session.files_scanned()),
                count
            ),
        );
    }

    fn handle_message(&mut self, message: Message) {
        match message {
            Message::Volumes(result) => {
                self.volumes_loading = false;
                match result {
                    Ok(volumes) => {
                        debug!("{} volumes", volumes.len());
                        self.volumes = volumes;
                    }
                    Err(e) => {
                        warn!("Listing volumes failed: {e}");
                        self.notify(NotificationLevel::Error, e.to_string());
                    }
                }
            }
            Message::Listing { seq, path, result } => self.apply_listing(seq, path, result),
            Message::BatchProgress { completed } => self.deletion.advance(completed),
            Message::BatchFinished(report) => self.finish_batch(report),
        }
    }

    // ── Selection ──────────────────────────────────────

    pub fn toggle_selection(&mut self, id: &str) {
        if self.navigator.listing().contains(id) {
            self.selection.toggle(id);
        }
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(self.navigator.listing());
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn header_state(&self) -> HeaderState {
        self.selection.header_state(self.navigator.listing())
    }

    // ── Deletion ───────────────────────────────────────

    /// Whether the delete affordance should be offered for the current listing.
    pub fn can_delete(&self) -> bool {
        self.navigator.current_path().is_some()
            && !self.navigator.is_at_root()
            && self.deletion.is_idle()
    }

    /// Ask to delete a single entry of the current listing.
    pub fn request_delete(&mut self, id: &str) {
        let entries: Vec<Entry> = self.navigator.listing().get(id).cloned().into_iter().collect();
        self.request_batch(entries);
    }

    /// Ask to delete every selected entry.
    pub fn request_delete_selected(&mut self) {
        let entries: Vec<Entry> = self
            .selection
            .entries(self.navigator.listing())
            .into_iter()
            .cloned()
            .collect();
        self.request_batch(entries);
    }

    fn request_batch(&mut self, entries: Vec<Entry>) {
        let at_root = self.navigator.is_at_root();
        if let Err(rejection) = self.deletion.request(entries, at_root) {
            self.notify(NotificationLevel::Warning, rejection.to_string());
        }
    }

    pub fn cancel_delete(&mut self) {
        self.deletion.cancel();
    }

    /// Run the pending batch in `mode` on a worker thread.
    pub fn confirm_delete(&mut self, mode: DeleteMode) {
        let Some(batch) = self.deletion.begin(mode) else {
            return;
        };
        info!("Deleting {} entries ({mode})", batch.len());

        let engine = Arc::clone(&self.engine);
        let tx = self.tx.clone();
        let spawned = thread::Builder::new()
            .name("spacescope-delete".into())
            .spawn(move || {
                let report = deletion::execute(engine.as_ref(), &batch, mode, |completed, _| {
                    let _ = tx.send(Message::BatchProgress { completed });
                });
                let _ = tx.send(Message::BatchFinished(report));
            });
        if let Err(e) = spawned {
            self.deletion.finish();
            self.notify(
                NotificationLevel::Error,
                format!("Could not start deletion: {e}"),
            );
        }
    }

    /// Report, refresh once, clear the selection. In that order.
    fn finish_batch(&mut self, report: BatchReport) {
        self.deletion.finish();

        let level = match report.outcome() {
            BatchOutcome::Success => NotificationLevel::Success,
            BatchOutcome::Partial => NotificationLevel::Warning,
            BatchOutcome::Failure => NotificationLevel::Error,
        };
        self.notify(level, report.summary());

        if let Some(current) = self.navigator.current_path().map(Path::to_path_buf) {
            self.load(current);
        }
        self.selection.clear();
    }

    // ── Derived views ──────────────────────────────────

    /// Pie slices for the current listing; empty while a scan is running.
    pub fn chart(&self) -> Vec<PieSlice> {
        if self.session.is_running() {
            return Vec::new();
        }
        distribution(&self.navigator.listing().entries)
    }

    /// Export the current listing; the outcome is reported as a notification.
    pub fn export_listing(&mut self, path: &Path) {
        match export::export_listing(self.navigator.listing(), path) {
            Ok(_) => self.notify(
                NotificationLevel::Success,
                format!("Exported to {}", path.display()),
            ),
            Err(e) => self.notify(NotificationLevel::Error, format!("Export failed: {e:#}")),
        }
    }

    // ── Notifications ──────────────────────────────────

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        let message = message.into();
        debug!(?level, "{message}");
        self.notifications.push(Notification {
            level,
            message,
            created: Instant::now(),
        });
    }

    /// Remove notifications older than the configured lifetime.
    pub fn expire_notifications(&mut self, now: Instant) -> bool {
        let ttl = self.notification_ttl;
        let before = self.notifications.len();
        self.notifications
            .retain(|n| now.saturating_duration_since(n.created) < ttl);
        self.notifications.len() != before
    }

    pub fn dismiss_notification(&mut self, index: usize) {
        if index < self.notifications.len() {
            self.notifications.remove(index);
        }
    }

    // ── Accessors ──────────────────────────────────────

    pub fn volumes(&self) -> &[DriveDescriptor] {
        &self.volumes
    }

    pub fn volumes_loading(&self) -> bool {
        self.volumes_loading
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn listing(&self) -> &Listing {
        self.navigator.listing()
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.navigator.current_path()
    }

    pub fn session(&self) -> &ScanSession {
        &self.session
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn deletion(&self) -> &DeleteCoordinator {
        &self.deletion
    }

    pub fn default_delete_mode(&self) -> DeleteMode {
        self.default_delete_mode
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Listing responses dropped because a newer request superseded them.
    pub fn stale_responses(&self) -> u64 {
        self.navigator.stale_responses()
    }
}
