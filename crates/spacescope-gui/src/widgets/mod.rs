/// Reusable UI widgets.
pub mod confirm_dialog;
pub mod export_dialog;
pub mod size_bar;
pub mod status_bar;
pub mod toasts;
pub mod toolbar;
pub mod volume_card;
