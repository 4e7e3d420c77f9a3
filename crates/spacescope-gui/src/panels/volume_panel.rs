/// Volume panel -- the mounted volumes in the left sidebar.
use crate::state::AppState;
use crate::widgets::volume_card::{volume_card, CardAction};
use egui::Ui;

/// Draw the volume panel (left sidebar content).
pub fn volume_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Volumes");
    ui.add_space(4.0);

    if state.controller.volumes_loading() && state.controller.volumes().is_empty() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Looking for volumes...");
        });
        return;
    }

    if state.controller.volumes().is_empty() {
        ui.label(
            egui::RichText::new("No volumes found.")
                .size(12.0)
                .color(ui.visuals().weak_text_color()),
        );
        return;
    }

    let scanning = state.is_scanning();
    let root = state.controller.navigator().root_path().map(|p| p.to_path_buf());

    let mut chosen = None;
    for drive in state.controller.volumes() {
        let active = root.as_deref() == Some(drive.path.as_path());
        if let Some(action) = volume_card(ui, drive, active, scanning) {
            chosen = Some((action, drive.path.clone()));
        }
    }

    match chosen {
        Some((CardAction::Browse, path)) => state.browse_volume(path),
        Some((CardAction::Scan, path)) => state.scan_volume(path),
        None => {}
    }
}
