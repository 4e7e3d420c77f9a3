/// `LocalEngine` -- the real filesystem engine.
///
/// Listings size each child directory with a bounded-depth walk, in parallel
/// across children. Deep scans run on a named background thread with their
/// own rayon pool; a heartbeat thread turns the shared counters into one
/// ordered stream of `ScanEvent::Progress`, followed by the final `Complete`.
use super::progress::{ScanEvent, ScanProgress, ScanSink};
use super::Engine;
use crate::error::{EngineError, Result};
use crate::model::{DriveDescriptor, Entry};
use crate::platform;
use parking_lot::Mutex;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Tunables for listing and scanning, normally taken from `[scan]` config.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Skip children whose name starts with `.`.
    pub skip_hidden: bool,
    /// Directory levels below each listed child that count towards its size.
    pub listing_depth: usize,
    /// Same limit for deep scans; `None` walks everything.
    pub scan_depth: Option<usize>,
    /// Interval between progress events.
    pub progress_interval: Duration,
    /// Worker threads for deep scans.
    pub threads: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            skip_hidden: true,
            listing_depth: 3,
            scan_depth: None,
            progress_interval: Duration::from_millis(100),
            threads: num_cpus::get(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocalEngine {
    options: ScanOptions,
}

impl LocalEngine {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Readable, non-hidden children of `dir`.
    fn children(&self, dir: &Path) -> Result<Vec<fs::DirEntry>> {
        let meta = fs::metadata(dir).map_err(|e| EngineError::from_io(dir, e))?;
        if !meta.is_dir() {
            return Err(EngineError::NotADirectory(dir.to_path_buf()));
        }
        let read = fs::read_dir(dir).map_err(|e| EngineError::from_io(dir, e))?;
        let skip_hidden = self.options.skip_hidden;
        Ok(read
            .flatten()
            .filter(|child| !(skip_hidden && is_hidden(&child.file_name().to_string_lossy())))
            .collect())
    }
}

impl Engine for LocalEngine {
    fn list_volumes(&self) -> Result<Vec<DriveDescriptor>> {
        let drives = platform::enumerate_drives();
        if drives.is_empty() {
            return Err(EngineError::NoVolumes);
        }
        Ok(drives)
    }

    fn list_directory(&self, path: &Path) -> Result<Vec<Entry>> {
        let start = Instant::now();
        let children = self.children(path)?;
        let depth = Some(self.options.listing_depth);

        let mut entries: Vec<Entry> = children
            .par_iter()
            .filter_map(|child| describe(child, depth, None))
            .collect();
        sort_by_size(&mut entries);

        debug!(
            "Listed {} ({} entries) in {:.1?}",
            path.display(),
            entries.len(),
            start.elapsed()
        );
        Ok(entries)
    }

    fn start_scan(&self, path: &Path, sink: ScanSink) -> Result<()> {
        // An unreadable root is rejected here, before any thread starts.
        let children = self.children(path)?;
        let root = path.to_path_buf();
        let options = self.options.clone();

        thread::Builder::new()
            .name("spacescope-scanner".into())
            .spawn(move || run_scan(root, children, options, sink))
            .map_err(|e| EngineError::ScanRejected(e.to_string()))?;
        Ok(())
    }

    fn delete_entry(&self, path: &Path) -> Result<()> {
        let meta = fs::symlink_metadata(path).map_err(|e| EngineError::from_io(path, e))?;
        let removed = if meta.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };
        removed.map_err(|e| EngineError::from_io(path, e))?;
        info!("Deleted {}", path.display());
        Ok(())
    }

    fn trash_entry(&self, path: &Path) -> Result<()> {
        fs::symlink_metadata(path).map_err(|e| EngineError::from_io(path, e))?;
        trash::delete(path).map_err(|e| EngineError::Trash {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        info!("Moved {} to trash", path.display());
        Ok(())
    }
}

// ── Deep scan ───────────────────────────────────────────────────

/// Counters shared between scan workers and the heartbeat thread.
struct SharedProgress {
    files_scanned: AtomicU64,
    finished: AtomicUsize,
    total: usize,
    current_path: Mutex<PathBuf>,
    done: AtomicBool,
    /// Set once the subscriber has gone away.
    abandoned: AtomicBool,
}

impl SharedProgress {
    fn new(root: &Path, total: usize) -> Self {
        Self {
            files_scanned: AtomicU64::new(0),
            finished: AtomicUsize::new(0),
            total,
            current_path: Mutex::new(root.to_path_buf()),
            done: AtomicBool::new(false),
            abandoned: AtomicBool::new(false),
        }
    }

    fn snapshot(&self) -> ScanProgress {
        let finished = self.finished.load(Ordering::Relaxed);
        let progress = if self.total == 0 {
            0.0
        } else {
            (finished as f64 / self.total as f64 * 100.0) as f32
        };
        ScanProgress {
            current_path: self.current_path.lock().clone(),
            files_scanned: self.files_scanned.load(Ordering::Relaxed),
            progress,
        }
    }

    #[inline]
    fn is_abandoned(&self) -> bool {
        self.abandoned.load(Ordering::Relaxed)
    }
}

fn run_scan(root: PathBuf, children: Vec<fs::DirEntry>, options: ScanOptions, sink: ScanSink) {
    let start = Instant::now();
    info!(
        "Starting scan of {} ({} top-level entries)",
        root.display(),
        children.len()
    );

    let shared = Arc::new(SharedProgress::new(&root, children.len()));

    let heartbeat = {
        let shared = Arc::clone(&shared);
        let sink = sink.clone();
        let interval = options.progress_interval;
        thread::Builder::new()
            .name("spacescope-heartbeat".into())
            .spawn(move || {
                while !shared.done.load(Ordering::Relaxed) {
                    thread::sleep(interval);
                    if shared.done.load(Ordering::Relaxed) {
                        break;
                    }
                    if sink.send(ScanEvent::Progress(shared.snapshot())).is_err() {
                        shared.abandoned.store(true, Ordering::Relaxed);
                        break;
                    }
                }
            })
    };
    let heartbeat = match heartbeat {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Could not start progress heartbeat: {e}");
            None
        }
    };

    let size_all = || -> Vec<Entry> {
        children
            .par_iter()
            .filter_map(|child| {
                if shared.is_abandoned() {
                    return None;
                }
                let entry = describe(child, options.scan_depth, Some(shared.as_ref()));
                shared.finished.fetch_add(1, Ordering::Relaxed);
                entry
            })
            .collect()
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.threads.max(1))
        .thread_name(|i| format!("spacescope-scan-{i}"))
        .build();
    let mut entries = match pool {
        Ok(pool) => pool.install(size_all),
        Err(e) => {
            warn!("Falling back to the global thread pool: {e}");
            size_all()
        }
    };
    sort_by_size(&mut entries);

    shared.done.store(true, Ordering::Relaxed);
    if let Some(handle) = heartbeat {
        let _ = handle.join();
    }

    if shared.is_abandoned() {
        debug!("Scan of {} abandoned by subscriber", root.display());
        return;
    }

    let files_scanned = shared.files_scanned.load(Ordering::Relaxed);
    let _ = sink.send(ScanEvent::Progress(ScanProgress {
        current_path: root.clone(),
        files_scanned,
        progress: 100.0,
    }));
    let _ = sink.send(ScanEvent::Complete(entries));

    info!(
        "Scan of {} complete: {} files in {:.2?}",
        root.display(),
        files_scanned,
        start.elapsed()
    );
}

// ── Sizing helpers ──────────────────────────────────────────────

#[inline]
fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Size-descending, stable.
fn sort_by_size(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));
}

/// Turn one directory child into an `Entry`. Unreadable children are skipped.
fn describe(
    child: &fs::DirEntry,
    depth: Option<usize>,
    shared: Option<&SharedProgress>,
) -> Option<Entry> {
    let path = child.path();
    let meta = child.metadata().ok()?;

    let entry = if meta.is_dir() {
        if let Some(shared) = shared {
            *shared.current_path.lock() = path.clone();
        }
        let bytes = directory_size(&path, depth, shared);
        Entry::directory(path, bytes)
    } else {
        if let Some(shared) = shared {
            shared.files_scanned.fetch_add(1, Ordering::Relaxed);
        }
        Entry::file(path, meta.len())
    };
    Some(entry.with_modified(meta.modified().ok()))
}

/// Total size of regular files below `dir`, descending at most `depth`
/// directory levels (`None` = unlimited). Hidden files count.
///
/// Runs serially: callers already parallelise across siblings.
fn directory_size(dir: &Path, depth: Option<usize>, shared: Option<&SharedProgress>) -> u64 {
    let walker = jwalk::WalkDir::new(dir)
        .skip_hidden(false)
        .follow_links(false)
        .sort(false)
        .parallelism(jwalk::Parallelism::Serial);
    let walker = match depth {
        // Files directly inside `dir` sit at walk depth 1.
        Some(depth) => walker.max_depth(depth + 1),
        None => walker,
    };

    let mut total: u64 = 0;
    for entry in walker.into_iter().flatten() {
        if entry.depth == 0 {
            continue;
        }
        let file_type = entry.file_type();
        if file_type.is_file() {
            if let Ok(meta) = entry.metadata() {
                total += meta.len();
            }
            if let Some(shared) = shared {
                shared.files_scanned.fetch_add(1, Ordering::Relaxed);
            }
        } else if file_type.is_dir() {
            if let Some(shared) = shared {
                if shared.is_abandoned() {
                    break;
                }
                *shared.current_path.lock() = entry.path();
            }
        }
    }
    total
}
