/// Lifecycle of one deep scan: Idle -> Running -> Complete | Failed.
///
/// A session owns its event subscription and releases it exactly once, on
/// the first terminal transition. Sessions are never reused; starting a new
/// scan builds a new one.
use crate::engine::{ScanEvent, ScanProgress, ScanSink, ScanSubscription};
use crate::model::Entry;
use crossbeam_channel::TryRecvError;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Running,
    Complete,
    Failed,
}

/// Result of feeding one event to a session.
#[derive(Debug, PartialEq)]
pub enum SessionUpdate {
    /// Not running, or the event was for nobody. Nothing changed.
    Ignored,
    Progressed,
    /// Terminal. The entries are the authoritative listing for the root.
    Completed(Vec<Entry>),
}

#[derive(Debug)]
pub struct ScanSession {
    id: u64,
    state: ScanState,
    root: Option<PathBuf>,
    probe_path: Option<PathBuf>,
    files_scanned: u64,
    progress: f32,
    error: Option<String>,
    subscription: Option<ScanSubscription>,
    started_at: Option<Instant>,
    elapsed: Option<Duration>,
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::idle()
    }
}

impl ScanSession {
    pub fn idle() -> Self {
        Self {
            id: 0,
            state: ScanState::Idle,
            root: None,
            probe_path: None,
            files_scanned: 0,
            progress: 0.0,
            error: None,
            subscription: None,
            started_at: None,
            elapsed: None,
        }
    }

    /// A fresh Running session for `root`, plus the sink to hand the engine.
    pub fn start(id: u64, root: impl Into<PathBuf>) -> (Self, ScanSink) {
        let (sink, subscription) = ScanSubscription::open(id);
        let session = Self {
            id,
            state: ScanState::Running,
            root: Some(root.into()),
            subscription: Some(subscription),
            started_at: Some(Instant::now()),
            ..Self::idle()
        };
        (session, sink)
    }

    /// Next pending event from the engine, if any.
    ///
    /// A producer that disconnects without completing fails the session.
    pub fn next_event(&mut self) -> Option<ScanEvent> {
        let subscription = self.subscription.as_ref()?;
        match subscription.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.fail("Scan stopped before completing");
                None
            }
        }
    }

    pub fn handle(&mut self, event: ScanEvent) -> SessionUpdate {
        if self.state != ScanState::Running {
            return SessionUpdate::Ignored;
        }
        match event {
            ScanEvent::Progress(progress) => {
                self.apply_progress(progress);
                SessionUpdate::Progressed
            }
            ScanEvent::Complete(entries) => {
                self.state = ScanState::Complete;
                self.progress = 100.0;
                self.elapsed = self.started_at.map(|t| t.elapsed());
                self.release();
                info!(
                    session = self.id,
                    "Scan complete: {} entries, {} files",
                    entries.len(),
                    self.files_scanned
                );
                SessionUpdate::Completed(entries)
            }
        }
    }

    fn apply_progress(&mut self, progress: ScanProgress) {
        self.probe_path = Some(progress.current_path);
        // The counter never goes backwards while running.
        self.files_scanned = self.files_scanned.max(progress.files_scanned);
        self.progress = progress.progress;
    }

    /// Move a running session to Failed. The progress ratio is left as is.
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.state != ScanState::Running {
            return;
        }
        let message = message.into();
        warn!(session = self.id, "Scan failed: {message}");
        self.state = ScanState::Failed;
        self.error = Some(message);
        self.elapsed = self.started_at.map(|t| t.elapsed());
        self.release();
    }

    /// Detach from the engine without changing state. Used when a newer
    /// session takes over.
    pub fn abandon(&mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.release();
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ScanState::Running
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn probe_path(&self) -> Option<&Path> {
        self.probe_path.as_deref()
    }

    pub fn files_scanned(&self) -> u64 {
        self.files_scanned
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Running time so far, or the final duration once terminal.
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed.or_else(|| self.started_at.map(|t| t.elapsed()))
    }
}
