/// Chart panel -- proportional size pie for the current listing.
///
/// While a scan runs the panel shows scan progress instead of the pie.
use crate::state::AppState;
use egui::{Color32, Pos2, Sense, Shape, Stroke, Ui, Vec2};
use spacescope_core::analysis::{slice_at_angle, PieSlice, SliceSource};
use spacescope_core::model::size::{format_bytes, format_count};

/// Largest arc, in degrees, drawn as one convex fan.
const FAN_STEP: f64 = 90.0;
/// Arc segment length in degrees.
const ARC_STEP: f64 = 3.0;

/// Draw the chart panel.
pub fn chart_panel(ui: &mut Ui, state: &mut AppState) {
    let color_normal = ui.visuals().text_color();
    let color_muted = ui.visuals().weak_text_color();

    ui.heading("Breakdown");
    ui.add_space(4.0);

    if state.is_scanning() {
        scan_progress(ui, state);
        return;
    }

    let slices = state.chart();
    if slices.is_empty() {
        state.hovered_slice = None;
        ui.label(
            egui::RichText::new("Nothing to chart yet.")
                .color(color_muted)
                .size(12.0),
        );
        return;
    }

    let side = ui.available_width().min(320.0);
    let (rect, response) = ui.allocate_exact_size(Vec2::splat(side), Sense::click());
    let center = rect.center();
    let radius = side * 0.45;
    let painter = ui.painter_at(rect);

    state.hovered_slice = response
        .hover_pos()
        .and_then(|pos| slice_under(&slices, center, radius, pos));

    for (i, slice) in slices.iter().enumerate() {
        let lift = if state.hovered_slice == Some(i) { 6.0 } else { 0.0 };
        paint_slice(&painter, center, radius + lift, slice);
    }

    // Clicking a folder slice opens it.
    if response.clicked() {
        if let Some(SliceSource::Entry { id, .. }) =
            state.hovered_slice.map(|i| &slices[i].source)
        {
            let id = id.clone();
            state.open(&id);
            return;
        }
    }

    ui.add_space(6.0);

    match state.hovered_slice.and_then(|i| slices.get(i)) {
        Some(slice) => hover_detail(ui, slice),
        None => {
            ui.label(
                egui::RichText::new("Hover a slice for details.")
                    .color(color_muted)
                    .size(11.0),
            );
        }
    }

    ui.add_space(6.0);
    ui.separator();

    egui::ScrollArea::vertical().show(ui, |ui| {
        for slice in &slices {
            ui.horizontal(|ui| {
                let (dot_rect, _) = ui.allocate_exact_size(Vec2::new(10.0, 10.0), Sense::hover());
                ui.painter_at(dot_rect)
                    .circle_filled(dot_rect.center(), 4.0, slice_color(slice));
                ui.label(
                    egui::RichText::new(&slice.name)
                        .color(color_normal)
                        .size(12.0),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!("{:.1}%", slice.percentage))
                            .color(color_muted)
                            .size(11.0),
                    );
                });
            });
        }
    });
}

fn scan_progress(ui: &mut Ui, state: &AppState) {
    let session = state.controller.session();
    ui.horizontal(|ui| {
        ui.spinner();
        ui.label(egui::RichText::new("Scanning...").size(13.0));
    });
    ui.add_space(6.0);
    ui.add(
        egui::ProgressBar::new(session.progress().clamp(0.0, 100.0) / 100.0)
            .show_percentage(),
    );
    ui.add_space(4.0);
    ui.label(
        egui::RichText::new(format!(
            "{} files scanned",
            format_count(session.files_scanned())
        ))
        .size(12.0),
    );
    if let Some(probe) = session.probe_path() {
        ui.label(
            egui::RichText::new(probe.display().to_string())
                .size(11.0)
                .color(ui.visuals().weak_text_color()),
        );
    }
}

fn hover_detail(ui: &mut Ui, slice: &PieSlice) {
    ui.label(egui::RichText::new(&slice.name).strong().size(13.0));
    ui.label(
        egui::RichText::new(format!(
            "{} · {:.1}%",
            format_bytes(slice.value),
            slice.percentage
        ))
        .size(12.0),
    );
    match &slice.source {
        SliceSource::Entry { path, .. } => {
            ui.label(
                egui::RichText::new(path.display().to_string())
                    .size(11.0)
                    .color(ui.visuals().weak_text_color()),
            );
        }
        SliceSource::Others { count } => {
            ui.label(
                egui::RichText::new(format!("{count} smaller entries"))
                    .size(11.0)
                    .color(ui.visuals().weak_text_color()),
            );
        }
    }
}

/// Index of the slice under `pos`, if `pos` lies inside the pie.
fn slice_under(slices: &[PieSlice], center: Pos2, radius: f32, pos: Pos2) -> Option<usize> {
    let d = pos - center;
    if d.length() > radius {
        return None;
    }
    // Screen y grows downwards, so atan2 is already clockwise from 3 o'clock.
    let angle = (d.y as f64).atan2(d.x as f64).to_degrees();
    slice_at_angle(slices, angle)
}

fn paint_slice(painter: &egui::Painter, center: Pos2, radius: f32, slice: &PieSlice) {
    if slice.span() <= 0.0 {
        return;
    }
    let color = slice_color(slice);
    let mut start = slice.start_angle;
    while start < slice.end_angle {
        let end = (start + FAN_STEP).min(slice.end_angle);
        let mut points = vec![center];
        let steps = ((end - start) / ARC_STEP).ceil().max(1.0) as usize;
        for k in 0..=steps {
            let a = (start + (end - start) * k as f64 / steps as f64).to_radians();
            points.push(center + radius * Vec2::new(a.cos() as f32, a.sin() as f32));
        }
        painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
        start = end;
    }

    // Thin separator from the centre to the slice start.
    let a = slice.start_angle.to_radians();
    painter.line_segment(
        [
            center,
            center + radius * Vec2::new(a.cos() as f32, a.sin() as f32),
        ],
        Stroke::new(1.0, Color32::from_black_alpha(90)),
    );
}

fn slice_color(slice: &PieSlice) -> Color32 {
    let [r, g, b] = slice.color;
    Color32::from_rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spacescope_core::analysis::distribution;
    use spacescope_core::model::Entry;

    fn slices() -> Vec<PieSlice> {
        distribution(&[Entry::file("/r/a", 300), Entry::file("/r/b", 100)])
    }

    /// Straight up is where the first slice starts.
    #[test]
    fn test_pointer_above_center_hits_first_slice() {
        let center = Pos2::new(100.0, 100.0);
        let hit = slice_under(&slices(), center, 50.0, Pos2::new(101.0, 60.0));
        assert_eq!(hit, Some(0));
    }

    /// The second slice covers the last quarter, up-left of the centre.
    #[test]
    fn test_pointer_up_left_hits_second_slice() {
        let center = Pos2::new(100.0, 100.0);
        let hit = slice_under(&slices(), center, 50.0, Pos2::new(80.0, 80.0));
        assert_eq!(hit, Some(1));
    }

    #[test]
    fn test_pointer_outside_radius_misses() {
        let center = Pos2::new(100.0, 100.0);
        assert_eq!(slice_under(&slices(), center, 50.0, Pos2::new(100.0, 10.0)), None);
    }
}
