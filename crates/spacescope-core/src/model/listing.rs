/// The entries currently displayed for one directory or one scan result.
use super::entry::Entry;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    /// Directory (or scan root) this listing represents.
    pub path: PathBuf,
    /// Entries in engine order, normally size-descending.
    pub entries: Vec<Entry>,
}

impl Listing {
    pub fn new(path: impl Into<PathBuf>, entries: Vec<Entry>) -> Self {
        Self {
            path: path.into(),
            entries,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Sum of `size_bytes` over all entries.
    pub fn total_bytes(&self) -> u64 {
        self.entries.iter().map(|e| e.size_bytes).sum()
    }

    /// Entries matching `query` (case-insensitive substring of the name),
    /// stably sorted by `column`/`order`. The listing itself is untouched.
    pub fn view(&self, query: &str, column: SortColumn, order: SortOrder) -> Vec<&Entry> {
        let needle = query.trim().to_lowercase();
        let mut rows: Vec<&Entry> = self
            .entries
            .iter()
            .filter(|e| needle.is_empty() || e.name.to_lowercase().contains(&needle))
            .collect();

        rows.sort_by(|a, b| {
            let ord = compare(a, b, column);
            match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        });
        rows
    }
}

fn compare(a: &Entry, b: &Entry, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortColumn::Size => a.size_bytes.cmp(&b.size_bytes),
        SortColumn::Modified => a.last_modified.cmp(&b.last_modified),
        SortColumn::Kind => a.kind_label().cmp(&b.kind_label()),
    }
}

/// Sortable table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Name,
    Size,
    Modified,
    Kind,
}

impl SortColumn {
    /// Order applied when the column is first chosen.
    pub fn default_order(self) -> SortOrder {
        match self {
            Self::Size | Self::Modified => SortOrder::Descending,
            Self::Name | Self::Kind => SortOrder::Ascending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Size => "Size",
            Self::Modified => "Modified",
            Self::Kind => "Kind",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Listing {
        Listing::new(
            "/r",
            vec![
                Entry::directory("/r/Videos", 900),
                Entry::file("/r/notes.txt", 10),
                Entry::file("/r/archive.zip", 300),
                Entry::directory("/r/music", 300),
            ],
        )
    }

    fn names(rows: &[&Entry]) -> Vec<String> {
        rows.iter().map(|e| e.name.to_string()).collect()
    }

    #[test]
    fn test_view_sorts_by_size_stably() {
        let listing = sample();
        let rows = listing.view("", SortColumn::Size, SortOrder::Descending);
        // Ties keep listing order.
        assert_eq!(names(&rows), ["Videos", "archive.zip", "music", "notes.txt"]);
    }

    #[test]
    fn test_view_sorts_by_name_case_insensitive() {
        let listing = sample();
        let rows = listing.view("", SortColumn::Name, SortOrder::Ascending);
        assert_eq!(names(&rows), ["archive.zip", "music", "notes.txt", "Videos"]);
    }

    #[test]
    fn test_view_filters_without_touching_listing() {
        let listing = sample();
        let rows = listing.view("  MU ", SortColumn::Size, SortOrder::Descending);
        assert_eq!(names(&rows), ["music"]);
        assert_eq!(listing.len(), 4);
    }

    #[test]
    fn test_lookup_and_totals() {
        let listing = sample();
        assert!(listing.contains("/r/notes.txt"));
        assert!(!listing.contains("/r/missing"));
        assert_eq!(listing.total_bytes(), 1510);
    }

    #[test]
    fn test_default_orders() {
        assert_eq!(SortColumn::Size.default_order(), SortOrder::Descending);
        assert_eq!(SortColumn::Name.default_order(), SortOrder::Ascending);
        assert_eq!(SortOrder::Ascending.flipped(), SortOrder::Descending);
    }
}
