/// The engine boundary -- everything that touches the filesystem or the OS.
///
/// The orchestration layer only ever talks to an `Engine`. `LocalEngine` is
/// the real implementation; tests script their own.
pub mod local;
pub mod progress;

pub use local::{LocalEngine, ScanOptions};
pub use progress::{ScanEvent, ScanProgress, ScanSink, ScanSubscription};

use crate::error::Result;
use crate::model::{DriveDescriptor, Entry};
use std::path::Path;

/// Commands consumed by the `Controller`.
///
/// All methods block; the controller calls them from worker threads, except
/// `start_scan`, which must return as soon as the job is accepted and report
/// everything else through `sink`.
pub trait Engine: Send + Sync + 'static {
    fn list_volumes(&self) -> Result<Vec<DriveDescriptor>>;

    /// Immediate children of `path`, sized, usually size-descending.
    fn list_directory(&self, path: &Path) -> Result<Vec<Entry>>;

    /// Accept or reject a deep scan of `path`.
    fn start_scan(&self, path: &Path, sink: ScanSink) -> Result<()>;

    /// Permanently remove `path` (recursively for directories).
    fn delete_entry(&self, path: &Path) -> Result<()>;

    /// Move `path` to the platform trash.
    fn trash_entry(&self, path: &Path) -> Result<()>;
}
