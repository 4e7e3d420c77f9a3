/// Batch deletion: request, confirm, execute, report.
///
/// A batch is a snapshot of entries taken when deletion is requested. It is
/// executed one entry at a time, best-effort: a failure is recorded and the
/// next entry is attempted. The coordinator never edits a listing; the
/// caller refreshes after the report.
use crate::engine::Engine;
use crate::model::size::format_bytes;
use crate::model::Entry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteMode {
    Permanent,
    Trash,
}

impl DeleteMode {
    pub fn verb(self) -> &'static str {
        match self {
            Self::Permanent => "Deleted",
            Self::Trash => "Moved to trash",
        }
    }
}

impl fmt::Display for DeleteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Permanent => "permanent",
            Self::Trash => "trash",
        })
    }
}

/// Entries captured when deletion was requested.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletionBatch {
    entries: Vec<Entry>,
}

impl DeletionBatch {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.entries.iter().map(|e| e.size_bytes).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    Success,
    Partial,
    Failure,
}

/// Per-batch tally.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub mode: DeleteMode,
    pub succeeded: usize,
    pub failed: usize,
    pub bytes_freed: u64,
    pub failures: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn outcome(&self) -> BatchOutcome {
        match (self.succeeded, self.failed) {
            (_, 0) => BatchOutcome::Success,
            (0, _) => BatchOutcome::Failure,
            _ => BatchOutcome::Partial,
        }
    }

    /// One-line message for the notification.
    pub fn summary(&self) -> String {
        let plural = |n: usize| if n == 1 { "item" } else { "items" };
        match self.outcome() {
            BatchOutcome::Success => format!(
                "{} {} {} ({})",
                self.mode.verb(),
                self.succeeded,
                plural(self.succeeded),
                format_bytes(self.bytes_freed)
            ),
            BatchOutcome::Partial => format!(
                "{} {} {}, {} failed",
                self.mode.verb(),
                self.succeeded,
                plural(self.succeeded),
                self.failed
            ),
            BatchOutcome::Failure => match self.mode {
                DeleteMode::Permanent => {
                    format!("Failed to delete {} {}", self.failed, plural(self.failed))
                }
                DeleteMode::Trash => format!(
                    "Failed to move {} {} to trash",
                    self.failed,
                    plural(self.failed)
                ),
            },
        }
    }
}

/// Run every entry of `batch` through the engine, in order.
///
/// `on_progress(completed, total)` is called after each entry.
pub fn execute(
    engine: &dyn Engine,
    batch: &DeletionBatch,
    mode: DeleteMode,
    mut on_progress: impl FnMut(usize, usize),
) -> BatchReport {
    let total = batch.len();
    let mut report = BatchReport {
        mode,
        succeeded: 0,
        failed: 0,
        bytes_freed: 0,
        failures: Vec::new(),
    };

    for (i, entry) in batch.entries().iter().enumerate() {
        let result = match mode {
            DeleteMode::Permanent => engine.delete_entry(&entry.path),
            DeleteMode::Trash => engine.trash_entry(&entry.path),
        };
        match result {
            Ok(()) => {
                report.succeeded += 1;
                report.bytes_freed += entry.size_bytes;
            }
            Err(e) => {
                warn!("Delete ({mode}) of {} failed: {e}", entry.path.display());
                report.failed += 1;
                report.failures.push((entry.path.clone(), e.to_string()));
            }
        }
        on_progress(i + 1, total);
    }

    info!(
        "Batch ({mode}) finished: {} succeeded, {} failed",
        report.succeeded, report.failed
    );
    report
}

/// Why a delete request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteRejection {
    /// The current directory is the scanned root.
    AtRoot,
    /// A batch is awaiting confirmation or running.
    Busy,
    Empty,
}

impl fmt::Display for DeleteRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AtRoot => "Deleting is disabled at the scanned root",
            Self::Busy => "A deletion is already in progress",
            Self::Empty => "Nothing selected",
        })
    }
}

#[derive(Debug, Default)]
enum Phase {
    #[default]
    Idle,
    Confirming(DeletionBatch),
    Running {
        mode: DeleteMode,
        completed: usize,
        total: usize,
    },
}

/// Confirmation and progress bookkeeping for one batch at a time.
#[derive(Debug, Default)]
pub struct DeleteCoordinator {
    phase: Phase,
}

impl DeleteCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot `entries` and wait for confirmation.
    pub fn request(&mut self, entries: Vec<Entry>, at_root: bool) -> Result<(), DeleteRejection> {
        if !matches!(self.phase, Phase::Idle) {
            return Err(DeleteRejection::Busy);
        }
        if at_root {
            return Err(DeleteRejection::AtRoot);
        }
        if entries.is_empty() {
            return Err(DeleteRejection::Empty);
        }
        self.phase = Phase::Confirming(DeletionBatch::new(entries));
        Ok(())
    }

    /// Drop a pending batch without running it.
    pub fn cancel(&mut self) -> Option<DeletionBatch> {
        match std::mem::take(&mut self.phase) {
            Phase::Confirming(batch) => Some(batch),
            other => {
                self.phase = other;
                None
            }
        }
    }

    /// Confirm the pending batch; returns it for execution.
    pub fn begin(&mut self, mode: DeleteMode) -> Option<DeletionBatch> {
        match std::mem::take(&mut self.phase) {
            Phase::Confirming(batch) => {
                self.phase = Phase::Running {
                    mode,
                    completed: 0,
                    total: batch.len(),
                };
                Some(batch)
            }
            other => {
                self.phase = other;
                None
            }
        }
    }

    pub fn advance(&mut self, done: usize) {
        if let Phase::Running { completed, total, .. } = &mut self.phase {
            *completed = done.min(*total);
        }
    }

    pub fn finish(&mut self) {
        self.phase = Phase::Idle;
    }

    pub fn pending(&self) -> Option<&DeletionBatch> {
        match &self.phase {
            Phase::Confirming(batch) => Some(batch),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    /// `(mode, completed, total)` while a batch runs.
    pub fn progress(&self) -> Option<(DeleteMode, usize, usize)> {
        match self.phase {
            Phase::Running {
                mode,
                completed,
                total,
            } => Some((mode, completed, total)),
            _ => None,
        }
    }
}
