/// SpaceScope GUI -- egui-based desktop frontend.
///
/// This crate contains all UI code. Business logic lives in `spacescope-core`.
pub mod app;
pub mod panels;
pub mod state;
pub mod widgets;

pub use app::{SpaceScopeApp, SpaceScopeState};
