/// Platform-specific functionality -- storage volume enumeration.
pub mod drives;

pub use drives::enumerate_drives;
