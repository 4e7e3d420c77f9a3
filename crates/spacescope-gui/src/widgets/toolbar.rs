/// Top action bar -- volume refresh, batch delete, export and branding.
use crate::state::AppState;
use egui::Ui;

/// Draw the toolbar.
pub fn toolbar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new("🔭 SpaceScope")
                .size(18.0)
                .strong()
                .color(ui.visuals().hyperlink_color),
        );

        ui.separator();

        let can_refresh = !state.controller.volumes_loading();
        if ui
            .add_enabled(can_refresh, egui::Button::new("🔄 Refresh"))
            .on_hover_text("Re-enumerate volumes")
            .clicked()
        {
            state.controller.refresh_volumes();
        }

        ui.separator();

        // Batch delete of the checked rows.
        let selected = state.controller.selection().len();
        let can_delete = selected > 0 && state.controller.can_delete();
        let delete_label = if selected > 0 {
            format!("🗑 Delete selected ({selected})")
        } else {
            "🗑 Delete selected".to_string()
        };
        let delete_btn = ui
            .add_enabled(
                can_delete,
                egui::Button::new(delete_label).min_size(egui::vec2(70.0, 28.0)),
            )
            .on_disabled_hover_text(if state.controller.navigator().is_at_root() {
                "Deleting is disabled at the scanned root"
            } else {
                "Select entries to delete"
            });
        if delete_btn.clicked() {
            state.request_delete_selected();
        }

        if selected > 0 && ui.button("Clear selection").clicked() {
            state.controller.clear_selection();
        }

        ui.separator();

        let can_export = !state.controller.listing().is_empty();
        if ui
            .add_enabled(can_export, egui::Button::new("📤 Export"))
            .on_hover_text(if can_export {
                "Export the current listing to CSV or JSON"
            } else {
                "Open a folder or run a scan first"
            })
            .clicked()
        {
            state.open_export();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("ℹ").on_hover_text("About SpaceScope").clicked() {
                state.show_about = true;
            }

            let theme_label = if state.dark_mode { "☀" } else { "🌙" };
            let theme_tip = if state.dark_mode {
                "Switch to light mode"
            } else {
                "Switch to dark mode"
            };
            if ui.button(theme_label).on_hover_text(theme_tip).clicked() {
                state.dark_mode = !state.dark_mode;
            }
        });
    });
}
