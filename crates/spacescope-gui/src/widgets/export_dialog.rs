/// Export dialog -- target path for the current listing.
use crate::state::AppState;

pub fn export_dialog(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_export {
        return;
    }

    let mut open = true;
    let mut export = false;
    egui::Window::new("Export listing")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([380.0, 0.0])
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new("A .json extension writes JSON, anything else CSV.")
                    .size(11.0)
                    .color(ui.visuals().weak_text_color()),
            );
            ui.add_space(4.0);
            let response =
                ui.add(egui::TextEdit::singleline(&mut state.export_path).desired_width(360.0));
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                export = true;
            }
            ui.add_space(6.0);
            if ui
                .add_enabled(
                    !state.export_path.trim().is_empty(),
                    egui::Button::new("📤 Export"),
                )
                .clicked()
            {
                export = true;
            }
        });

    if export {
        state.export();
    } else if !open {
        state.show_export = false;
    }
}
