/// Storage volume snapshot shown on the volume cards.
use super::size::{format_bytes, percentage};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Information about a single mounted volume.
///
/// Immutable snapshot; a refresh replaces the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveDescriptor {
    /// Display name, e.g. "Macintosh HD" or the mount point when unnamed.
    pub name: String,
    /// Mount point. Unique key of the volume.
    pub path: PathBuf,
    /// Formatted total capacity.
    pub total_space: String,
    /// Formatted used space.
    pub used_space: String,
    /// Formatted free space.
    pub free_space: String,
    /// Usage percentage (0.0–100.0).
    pub usage_percentage: f32,
    #[serde(default)]
    pub total_bytes: u64,
    #[serde(default)]
    pub used_bytes: u64,
    #[serde(default)]
    pub free_bytes: u64,
}

impl DriveDescriptor {
    /// Build a descriptor from raw capacities. `used` is clamped to `total`.
    pub fn from_capacity(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        total_bytes: u64,
        free_bytes: u64,
    ) -> Self {
        let used_bytes = total_bytes.saturating_sub(free_bytes);
        Self {
            name: name.into(),
            path: path.into(),
            total_space: format_bytes(total_bytes),
            used_space: format_bytes(used_bytes),
            free_space: format_bytes(free_bytes),
            usage_percentage: percentage(used_bytes, total_bytes) as f32,
            total_bytes,
            used_bytes,
            free_bytes,
        }
    }
}
