/// Transient outcome notifications, stacked in the bottom-right corner.
use crate::state::AppState;
use spacescope_core::NotificationLevel;

pub fn toasts(ctx: &egui::Context, state: &mut AppState) {
    if state.controller.notifications().is_empty() {
        return;
    }

    let mut dismissed = None;
    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-12.0, -36.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for (i, note) in state.controller.notifications().iter().enumerate() {
                egui::Frame::popup(ui.style())
                    .fill(level_color(note.level))
                    .show(ui, |ui| {
                        ui.set_max_width(340.0);
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(&note.message)
                                    .size(12.0)
                                    .color(egui::Color32::from_rgb(0x1e, 0x1e, 0x2e)),
                            );
                            if ui.small_button("✖").clicked() {
                                dismissed = Some(i);
                            }
                        });
                    });
                ui.add_space(4.0);
            }
        });

    if let Some(i) = dismissed {
        state.controller.dismiss_notification(i);
    }
}

fn level_color(level: NotificationLevel) -> egui::Color32 {
    match level {
        NotificationLevel::Info => egui::Color32::from_rgb(0x89, 0xb4, 0xfa),
        NotificationLevel::Success => egui::Color32::from_rgb(0xa6, 0xe3, 0xa1),
        NotificationLevel::Warning => egui::Color32::from_rgb(0xf9, 0xe2, 0xaf),
        NotificationLevel::Error => egui::Color32::from_rgb(0xf3, 0x8b, 0xa8),
    }
}
