/// Volume enumeration via `sysinfo`.
///
/// Lists every mounted disk with its name and total/used/free space.
use crate::model::DriveDescriptor;
use std::path::Path;
use sysinfo::Disks;

/// Enumerate all mounted volumes.
///
/// Returns an empty vec when the platform reports nothing; the engine turns
/// that into an error.
pub fn enumerate_drives() -> Vec<DriveDescriptor> {
    let disks = Disks::new_with_refreshed_list();
    let drives: Vec<DriveDescriptor> = disks
        .iter()
        .map(|disk| {
            let mount_point = disk.mount_point();
            let name = display_name(&disk.name().to_string_lossy(), mount_point);
            DriveDescriptor::from_capacity(
                name,
                mount_point,
                disk.total_space(),
                disk.available_space(),
            )
        })
        .collect();

    if drives.is_empty() {
        tracing::warn!("sysinfo reported no disks");
    }
    drives
}

/// The disk name, or a name derived from the mount point when it has none.
fn display_name(disk_name: &str, mount_point: &Path) -> String {
    let disk_name = disk_name.trim();
    if !disk_name.is_empty() {
        return disk_name.to_string();
    }

    let mount = mount_point.to_string_lossy();
    // Windows drive roots such as "C:\" read better as "Local Disk (C:)".
    let mut chars = mount.chars();
    if let (Some(letter), Some(':')) = (chars.next(), chars.next()) {
        if letter.is_ascii_alphabetic() {
            return format!("Local Disk ({letter}:)");
        }
    }
    mount.into_owned()
}
