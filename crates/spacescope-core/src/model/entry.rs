/// A single row of a directory listing or scan result.
///
/// Entries are immutable value objects: a refresh produces a brand new
/// `Vec<Entry>`, nothing is ever patched in place.
use super::size::format_bytes;
use chrono::{DateTime, Local};
use compact_str::CompactString;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// What a listed entry is on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    /// Wire name, also used for display and export.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
        }
    }
}

impl Serialize for EntryKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Engines tag files with a lowercase extension (`"png"`, `"rs"`) or the
/// literal `"file"`; only `"directory"` is special.
impl<'de> Deserialize<'de> for EntryKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(if tag == "directory" {
            Self::Directory
        } else {
            Self::File
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique within one listing. Engines use the absolute path.
    pub id: String,
    /// File or directory name only.
    pub name: CompactString,
    /// Formatted size as reported by the engine, e.g. `"1.50 KB"`.
    pub size: String,
    pub size_bytes: u64,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Local>>,
}

impl Entry {
    /// Build an entry for `path`, deriving id, name and formatted size.
    pub fn new(path: impl Into<PathBuf>, kind: EntryKind, size_bytes: u64) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            id: path.to_string_lossy().into_owned(),
            name: CompactString::new(name),
            size: format_bytes(size_bytes),
            size_bytes,
            kind,
            path,
            last_modified: None,
        }
    }

    pub fn file(path: impl Into<PathBuf>, size_bytes: u64) -> Self {
        Self::new(path, EntryKind::File, size_bytes)
    }

    pub fn directory(path: impl Into<PathBuf>, size_bytes: u64) -> Self {
        Self::new(path, EntryKind::Directory, size_bytes)
    }

    /// Attach a modification time (builder style).
    pub fn with_modified(mut self, modified: Option<SystemTime>) -> Self {
        self.last_modified = modified.map(DateTime::<Local>::from);
        self
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Lowercase extension of a file entry, if any.
    pub fn extension(&self) -> Option<String> {
        if self.is_dir() {
            return None;
        }
        Path::new(self.name.as_str())
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
    }

    /// Label for the "Kind" column: `Folder`, the uppercase extension, or `File`.
    pub fn kind_label(&self) -> String {
        match self.kind {
            EntryKind::Directory => "Folder".to_string(),
            EntryKind::File => self
                .extension()
                .map(|e| e.to_uppercase())
                .unwrap_or_else(|| "File".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_fields() {
        let e = Entry::file("/data/photos/cat.PNG", 1536);
        assert_eq!(e.id, "/data/photos/cat.PNG");
        assert_eq!(e.name.as_str(), "cat.PNG");
        assert_eq!(e.size, "1.50 KB");
        assert_eq!(e.extension().as_deref(), Some("png"));
        assert_eq!(e.kind_label(), "PNG");
        assert!(!e.is_dir());
    }

    #[test]
    fn test_directory_has_no_extension() {
        let e = Entry::directory("/data/archive.d", 0);
        assert!(e.is_dir());
        assert_eq!(e.extension(), None);
        assert_eq!(e.kind_label(), "Folder");
    }

    #[test]
    fn test_deserialize_engine_payload() {
        let json = r#"[
            {"id":"/r/a","name":"a","size":"2.00 KB","size_bytes":2048,"type":"directory","path":"/r/a"},
            {"id":"/r/b.rs","name":"b.rs","size":"10.00 B","size_bytes":10,"type":"rs","path":"/r/b.rs"}
        ]"#;
        let entries: Vec<Entry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries[0].kind, EntryKind::Directory);
        assert_eq!(entries[1].kind, EntryKind::File);
        assert!(entries[1].last_modified.is_none());
    }

    #[test]
    fn test_serialize_uses_type_tag() {
        let json = serde_json::to_string(&Entry::directory("/r/a", 1)).unwrap();
        assert!(json.contains(r#""type":"directory""#));
        assert!(!json.contains("last_modified"));
    }
}
