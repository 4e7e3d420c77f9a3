/// Bottom status bar -- scan progress, delete progress and listing totals.
use crate::state::AppState;
use egui::Ui;
use spacescope_core::deletion::DeleteMode;
use spacescope_core::model::size::{format_bytes, format_count};
use spacescope_core::session::ScanState;

/// Draw the status bar at the bottom of the window.
pub fn status_bar(ui: &mut Ui, state: &AppState) {
    let color_accent = ui.visuals().hyperlink_color;
    let color_weak = ui.visuals().weak_text_color();
    let color_normal = ui.visuals().text_color();
    let color_warning = egui::Color32::from_rgb(0xfa, 0xb3, 0x87);
    let color_success = egui::Color32::from_rgb(0xa6, 0xe3, 0xa1);

    let session = state.controller.session();

    ui.horizontal(|ui| {
        match session.state() {
            ScanState::Idle => {
                ui.label(egui::RichText::new("Ready").size(12.0).color(color_weak));
            }
            ScanState::Running => {
                ui.spinner();

                let probe = session
                    .probe_path()
                    .map(|p| truncate_path(&p.to_string_lossy(), 60))
                    .unwrap_or_default();
                ui.label(
                    egui::RichText::new(format!("Scanning {probe}..."))
                        .size(12.0)
                        .color(color_normal),
                );

                ui.separator();

                ui.label(
                    egui::RichText::new(format!(
                        "{} files",
                        format_count(session.files_scanned())
                    ))
                    .size(12.0)
                    .color(color_normal),
                );

                ui.separator();

                ui.add(
                    egui::ProgressBar::new(session.progress().clamp(0.0, 100.0) / 100.0)
                        .desired_width(160.0)
                        .text(format!("{:.0}%", session.progress())),
                );
            }
            ScanState::Complete => {
                ui.label(
                    egui::RichText::new("\u{2713} Scan complete")
                        .size(12.0)
                        .color(color_success),
                );
                ui.separator();
                ui.label(
                    egui::RichText::new(format!(
                        "{} files",
                        format_count(session.files_scanned())
                    ))
                    .size(12.0)
                    .color(color_normal),
                );
                if let Some(elapsed) = session.elapsed() {
                    ui.separator();
                    ui.label(
                        egui::RichText::new(format!("{:.1}s", elapsed.as_secs_f64()))
                            .size(12.0)
                            .color(color_weak),
                    );
                }
            }
            ScanState::Failed => {
                ui.label(
                    egui::RichText::new(format!(
                        "\u{26a0} {}",
                        session.error().unwrap_or("Scan failed")
                    ))
                    .size(12.0)
                    .color(color_warning),
                );
            }
        }

        if let Some((mode, completed, total)) = state.controller.deletion().progress() {
            ui.separator();
            ui.spinner();
            let action = match mode {
                DeleteMode::Permanent => "Deleting",
                DeleteMode::Trash => "Moving to trash",
            };
            ui.label(
                egui::RichText::new(format!("{action} {completed}/{total}"))
                    .size(12.0)
                    .color(color_warning),
            );
        }

        if state.controller.navigator().is_loading() {
            ui.separator();
            ui.spinner();
            ui.label(egui::RichText::new("Loading...").size(12.0).color(color_weak));
        }

        let listing = state.controller.listing();
        if !listing.is_empty() {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format_bytes(listing.total_bytes()))
                        .size(12.0)
                        .color(color_accent),
                );
                ui.separator();
                ui.label(
                    egui::RichText::new(format!("{} entries", format_count(listing.len() as u64)))
                        .size(12.0)
                        .color(color_normal),
                );
            });
        }
    });
}

/// Truncate a path string to fit within `max_len` characters,
/// replacing the middle with "..." if needed.
fn truncate_path(path: &str, max_len: usize) -> String {
    let chars: Vec<char> = path.chars().collect();
    if chars.len() <= max_len {
        return path.to_string();
    }
    let half = (max_len - 3) / 2;
    let head: String = chars[..half].iter().collect();
    let tail: String = chars[chars.len() - half..].iter().collect();
    format!("{head}...{tail}")
}
