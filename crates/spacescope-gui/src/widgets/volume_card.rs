/// Volume card widget -- name, mount point, usage bar and actions.
use crate::widgets::size_bar::usage_color;
use egui::{Rect, Sense, Ui, Vec2};
use spacescope_core::model::DriveDescriptor;

/// What the user asked for on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    /// Clicked the card body: list the volume's top level.
    Browse,
    /// Clicked "Scan": deep scan the volume.
    Scan,
}

const CARD_HEIGHT: f32 = 58.0;

/// Draw one volume card. `active` highlights the volume being browsed;
/// `scanning` only changes the hover hint, a new scan replaces the old one.
pub fn volume_card(
    ui: &mut Ui,
    drive: &DriveDescriptor,
    active: bool,
    scanning: bool,
) -> Option<CardAction> {
    let mut action = None;

    let (rect, response) =
        ui.allocate_exact_size(Vec2::new(ui.available_width(), CARD_HEIGHT), Sense::click());

    let painter = ui.painter_at(rect);

    let bg = if active {
        egui::Color32::from_rgb(0x36, 0x50, 0x78)
    } else if response.hovered() {
        egui::Color32::from_rgb(0x32, 0x48, 0x6e)
    } else {
        egui::Color32::from_rgb(0x28, 0x3a, 0x5c)
    };
    painter.rect_filled(rect, 4.0, bg);
    painter.rect_stroke(
        rect,
        4.0,
        egui::Stroke::new(1.0, egui::Color32::from_rgb(0x3a, 0x50, 0x72)),
        egui::StrokeKind::Outside,
    );

    let card_text = egui::Color32::WHITE;

    painter.text(
        egui::pos2(rect.left() + 8.0, rect.top() + 12.0),
        egui::Align2::LEFT_CENTER,
        &drive.name,
        egui::FontId::proportional(13.0),
        card_text,
    );

    // Usage bar.
    let bar_y = rect.top() + 26.0;
    let bar_width = rect.width() - 16.0;
    let bar_height = 8.0;
    let bar_rect = Rect::from_min_size(
        egui::pos2(rect.left() + 8.0, bar_y),
        Vec2::new(bar_width, bar_height),
    );
    painter.rect_filled(bar_rect, 3.0, egui::Color32::from_rgb(0x1e, 0x1e, 0x2e));

    let fill_width = bar_width * (drive.usage_percentage / 100.0).clamp(0.0, 1.0);
    if fill_width > 0.5 {
        let fill_rect = Rect::from_min_size(bar_rect.min, Vec2::new(fill_width, bar_height));
        painter.rect_filled(fill_rect, 3.0, usage_color(drive.usage_percentage));
    }

    let size_text = format!(
        "{} used of {} · {} free",
        drive.used_space, drive.total_space, drive.free_space
    );
    painter.text(
        egui::pos2(rect.left() + 8.0, bar_y + bar_height + 12.0),
        egui::Align2::LEFT_CENTER,
        &size_text,
        egui::FontId::proportional(11.0),
        card_text,
    );

    // Scan button overlaid on the top-right corner of the card.
    let button_rect = Rect::from_min_size(
        egui::pos2(rect.right() - 62.0, rect.top() + 3.0),
        Vec2::new(56.0, 18.0),
    );
    let scan = ui.put(
        button_rect,
        egui::Button::new(egui::RichText::new("▶ Scan").size(11.0)),
    );
    let scan = if scanning {
        scan.on_hover_text("Stop the running scan and scan this volume instead")
    } else {
        scan.on_hover_text(format!("Deep scan {}", drive.path.display()))
    };

    if scan.clicked() {
        action = Some(CardAction::Scan);
    } else if response
        .on_hover_text(drive.path.display().to_string())
        .clicked()
    {
        action = Some(CardAction::Browse);
    }

    ui.add_space(2.0);
    action
}
