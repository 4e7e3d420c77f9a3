/// Layout panels composed by the app.
pub mod chart_panel;
pub mod listing_panel;
pub mod volume_panel;
