/// SpaceScope Core -- scan, browse and clean-up orchestration.
///
/// This crate contains all business logic with zero UI dependencies.
/// Frontends drive a [`controller::Controller`] and render what it exposes.
///
/// # Modules
///
/// - [`model`] -- Entries, listings, volume descriptors and size formatting.
/// - [`engine`] -- The `Engine` boundary and the local filesystem engine.
/// - [`navigator`] -- Directory cache with last-request-wins loading.
/// - [`session`] -- Scan session state machine.
/// - [`selection`] -- Multi-selection scoped to one listing.
/// - [`deletion`] -- Batch delete and trash with per-item accounting.
/// - [`analysis`] -- Pie chart distribution of the current listing.
/// - [`controller`] -- The single orchestrating context.
/// - [`config`] -- TOML configuration.
/// - [`export`] -- CSV and JSON export of a listing.
/// - [`platform`] -- Volume enumeration.
pub mod analysis;
pub mod config;
pub mod controller;
pub mod deletion;
pub mod engine;
pub mod error;
pub mod export;
pub mod model;
pub mod navigator;
pub mod platform;
pub mod selection;
pub mod session;

pub use controller::{Controller, Notification, NotificationLevel};
pub use engine::{Engine, LocalEngine};
pub use error::EngineError;
