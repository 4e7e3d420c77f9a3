/// Delete confirmation dialog -- Permanent vs Trash for the pending batch.
use crate::state::AppState;
use spacescope_core::deletion::DeleteMode;
use spacescope_core::model::size::format_bytes;

/// Entries listed by name before the rest are summarised.
const MAX_LISTED: usize = 8;

/// Show the dialog while a batch awaits confirmation.
pub fn confirm_dialog(ctx: &egui::Context, state: &mut AppState) {
    let Some(batch) = state.controller.deletion().pending() else {
        return;
    };
    let count = batch.len();
    let total = format_bytes(batch.total_bytes());
    let names: Vec<String> = batch
        .entries()
        .iter()
        .take(MAX_LISTED)
        .map(|e| e.name.to_string())
        .collect();

    let mut confirmed = false;
    let mut cancelled = false;

    egui::Window::new("Confirm deletion")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([360.0, 0.0])
        .show(ctx, |ui| {
            let muted = ui.visuals().weak_text_color();
            let noun = if count == 1 { "item" } else { "items" };
            ui.label(
                egui::RichText::new(format!("Remove {count} {noun} ({total})?"))
                    .size(14.0)
                    .strong(),
            );
            ui.add_space(6.0);

            for name in &names {
                ui.label(egui::RichText::new(format!("• {name}")).size(12.0));
            }
            if count > names.len() {
                ui.label(
                    egui::RichText::new(format!("…and {} more", count - names.len()))
                        .size(12.0)
                        .color(muted),
                );
            }

            ui.add_space(8.0);
            ui.radio_value(&mut state.confirm_mode, DeleteMode::Trash, "Move to trash");
            ui.radio_value(
                &mut state.confirm_mode,
                DeleteMode::Permanent,
                "Delete permanently",
            );
            if state.confirm_mode == DeleteMode::Permanent {
                ui.label(
                    egui::RichText::new("This cannot be undone.")
                        .size(11.0)
                        .color(egui::Color32::from_rgb(0xf3, 0x8b, 0xa8)),
                );
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let label = match state.confirm_mode {
                    DeleteMode::Trash => "Move to trash",
                    DeleteMode::Permanent => "Delete",
                };
                if ui.button(label).clicked() {
                    confirmed = true;
                }
                if ui.button("Cancel").clicked() {
                    cancelled = true;
                }
            });
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        cancelled = true;
    }

    if confirmed {
        state.confirm_delete();
    } else if cancelled {
        state.controller.cancel_delete();
    }
}
