/// Directory cache and navigation.
///
/// The navigator never performs I/O itself. `load` hands back a tagged
/// `LoadRequest`; whoever runs the request reports the result through
/// `resolve`, and only the most recently issued request may land. Older
/// responses are counted and dropped.
use crate::error::EngineError;
use crate::model::{Entry, Listing};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A listing request the caller must run against the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub seq: u64,
    pub path: PathBuf,
}

/// What `resolve` did with a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The listing and current path were replaced.
    Applied,
    /// A newer request was issued meanwhile; the response was dropped.
    Stale,
    /// The latest request failed; the previous listing is kept.
    Failed(String),
}

#[derive(Debug, Default)]
pub struct Navigator {
    root_path: Option<PathBuf>,
    current_path: Option<PathBuf>,
    listing: Listing,
    is_loading: bool,
    /// Sequence number of the most recently issued request.
    latest_seq: u64,
    /// Bumped on every listing replacement.
    generation: u64,
    stale_responses: u64,
    last_error: Option<String>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `path` the active root and load it.
    pub fn select_root(&mut self, path: impl Into<PathBuf>) -> LoadRequest {
        let path = path.into();
        self.root_path = Some(path.clone());
        self.load(path)
    }

    /// Issue a request for `path`. Any request still in flight is superseded.
    pub fn load(&mut self, path: impl Into<PathBuf>) -> LoadRequest {
        self.latest_seq += 1;
        self.is_loading = true;
        LoadRequest {
            seq: self.latest_seq,
            path: path.into(),
        }
    }

    /// Apply the engine's answer to request `seq`.
    pub fn resolve(
        &mut self,
        seq: u64,
        path: PathBuf,
        result: Result<Vec<Entry>, EngineError>,
    ) -> LoadOutcome {
        if seq != self.latest_seq {
            self.stale_responses += 1;
            debug!(
                "Discarding stale listing #{seq} for {} (latest #{})",
                path.display(),
                self.latest_seq
            );
            return LoadOutcome::Stale;
        }

        self.is_loading = false;
        match result {
            Ok(entries) => {
                self.replace(path, entries);
                self.last_error = None;
                LoadOutcome::Applied
            }
            Err(err) => {
                let message = err.to_string();
                warn!("Listing {} failed: {message}", path.display());
                self.last_error = Some(message.clone());
                LoadOutcome::Failed(message)
            }
        }
    }

    /// Request the parent of the current directory.
    ///
    /// `None` when there is no current directory or it already is the root.
    pub fn navigate_up(&mut self) -> Option<LoadRequest> {
        let current = self.current_path.as_deref()?;
        if current.as_os_str().is_empty() || self.is_at_root() {
            return None;
        }
        let parent = parent_of(current);
        Some(self.load(parent))
    }

    /// Descend into `entry`. Files are not navigable.
    pub fn open(&mut self, entry: &Entry) -> Option<LoadRequest> {
        if !entry.is_dir() {
            return None;
        }
        Some(self.load(entry.path.clone()))
    }

    /// Reset for a scan of `root`: empty listing at the root, in-flight
    /// requests superseded.
    pub fn begin_scan(&mut self, root: impl Into<PathBuf>) {
        let root = root.into();
        self.root_path = Some(root.clone());
        self.latest_seq += 1;
        self.is_loading = false;
        self.last_error = None;
        self.replace(root, Vec::new());
    }

    /// Install a scan result as the authoritative listing at `root`.
    pub fn install(&mut self, root: impl Into<PathBuf>, entries: Vec<Entry>) {
        let root = root.into();
        self.root_path = Some(root.clone());
        self.latest_seq += 1;
        self.is_loading = false;
        self.last_error = None;
        self.replace(root, entries);
    }

    fn replace(&mut self, path: PathBuf, entries: Vec<Entry>) {
        self.current_path = Some(path.clone());
        self.listing = Listing::new(path, entries);
        self.generation += 1;
    }

    pub fn root_path(&self) -> Option<&Path> {
        self.root_path.as_deref()
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_at_root(&self) -> bool {
        match (&self.current_path, &self.root_path) {
            (Some(current), Some(root)) => current == root,
            _ => false,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stale_responses(&self) -> u64 {
        self.stale_responses
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

/// Drop the last path segment; `/` once segments run out.
fn parent_of(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(dir: &str, names: &[&str]) -> Vec<Entry> {
        names
            .iter()
            .map(|n| Entry::directory(format!("{dir}/{n}"), 1))
            .collect()
    }

    #[test]
    fn test_last_request_wins() {
        let mut nav = Navigator::new();
        let a = nav.load("/a");
        let b = nav.load("/b");
        assert!(nav.is_loading());

        assert_eq!(
            nav.resolve(b.seq, b.path.clone(), Ok(entries("/b", &["x"]))),
            LoadOutcome::Applied
        );
        assert_eq!(
            nav.resolve(a.seq, a.path.clone(), Ok(entries("/a", &["y"]))),
            LoadOutcome::Stale
        );

        assert_eq!(nav.current_path(), Some(Path::new("/b")));
        assert_eq!(nav.listing().entries[0].id, "/b/x");
        assert_eq!(nav.stale_responses(), 1);
        assert!(!nav.is_loading());
    }

    #[test]
    fn test_stale_response_keeps_loading_flag() {
        let mut nav = Navigator::new();
        let a = nav.load("/a");
        let _b = nav.load("/b");
        nav.resolve(a.seq, a.path, Ok(Vec::new()));
        assert!(nav.is_loading());
        assert_eq!(nav.current_path(), None);
    }

    #[test]
    fn test_failure_keeps_previous_listing() {
        let mut nav = Navigator::new();
        let req = nav.select_root("/r");
        nav.resolve(req.seq, req.path, Ok(entries("/r", &["a", "b"])));
        let generation = nav.generation();

        let req = nav.load("/r/a");
        let outcome = nav.resolve(
            req.seq,
            req.path,
            Err(EngineError::NotFound(PathBuf::from("/r/a"))),
        );

        assert!(matches!(outcome, LoadOutcome::Failed(_)));
        assert_eq!(nav.listing().len(), 2);
        assert_eq!(nav.current_path(), Some(Path::new("/r")));
        assert_eq!(nav.generation(), generation);
        assert!(!nav.is_loading());
        assert!(nav.last_error().is_some());
    }

    #[test]
    fn test_navigate_up_stops_at_root() {
        let mut nav = Navigator::new();
        assert_eq!(nav.navigate_up(), None);

        let req = nav.select_root("/r");
        nav.resolve(req.seq, req.path, Ok(Vec::new()));
        assert!(nav.is_at_root());
        assert_eq!(nav.navigate_up(), None);

        let req = nav.load("/r/a/b");
        nav.resolve(req.seq, req.path, Ok(Vec::new()));
        let up = nav.navigate_up().unwrap();
        assert_eq!(up.path, PathBuf::from("/r/a"));
    }

    #[test]
    fn test_navigate_up_without_root_reaches_slash() {
        let mut nav = Navigator::new();
        let req = nav.load("/top");
        nav.resolve(req.seq, req.path, Ok(Vec::new()));
        assert_eq!(nav.navigate_up().unwrap().path, PathBuf::from("/"));
        assert_eq!(parent_of(Path::new("/")), PathBuf::from("/"));
        assert_eq!(parent_of(Path::new("rel")), PathBuf::from("/"));
    }

    #[test]
    fn test_open_only_directories() {
        let mut nav = Navigator::new();
        assert_eq!(nav.open(&Entry::file("/r/f.txt", 1)), None);
        let req = nav.open(&Entry::directory("/r/d", 1)).unwrap();
        assert_eq!(req.path, PathBuf::from("/r/d"));
    }

    #[test]
    fn test_install_supersedes_in_flight_loads() {
        let mut nav = Navigator::new();
        nav.begin_scan("/r");
        assert!(nav.listing().is_empty());

        let pending = nav.load("/r/elsewhere");
        nav.install("/r", entries("/r", &["a"]));
        assert_eq!(
            nav.resolve(pending.seq, pending.path, Ok(Vec::new())),
            LoadOutcome::Stale
        );
        assert_eq!(nav.listing().len(), 1);
        assert!(nav.is_at_root());
    }
}
