/// Listing panel -- breadcrumb, search box and the sortable entry table.
use crate::state::AppState;
use crate::widgets::size_bar::size_bar;
use egui::Ui;
use egui_extras::{Column, TableBuilder};
use spacescope_core::model::size::percentage;
use spacescope_core::model::{SortColumn, SortOrder};
use spacescope_core::selection::HeaderState;
use std::path::{Path, PathBuf};

const ROW_HEIGHT: f32 = 22.0;

/// Clicks collected while the table borrows the state; applied afterwards.
enum RowAction {
    ToggleAll,
    Toggle(String),
    Open(String),
    Delete(String),
    Sort(SortColumn),
}

/// Draw the central listing panel.
pub fn listing_panel(ui: &mut Ui, state: &mut AppState) {
    let color_muted = ui.visuals().weak_text_color();

    let Some(current) = state.controller.current_path().map(Path::to_path_buf) else {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            let hint = if state.is_scanning() {
                "Scanning..."
            } else {
                "Pick a volume to browse it, or scan it for a full breakdown."
            };
            ui.label(egui::RichText::new(hint).size(14.0).color(color_muted));
        });
        return;
    };

    breadcrumb(ui, state, &current);
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        ui.label("🔍");
        ui.add(
            egui::TextEdit::singleline(&mut state.search)
                .hint_text("Filter by name")
                .desired_width(240.0),
        );
        if !state.search.is_empty() && ui.small_button("✖").clicked() {
            state.search.clear();
        }
    });

    if let Some(error) = state.controller.navigator().last_error() {
        ui.label(
            egui::RichText::new(format!("\u{26a0} {error}"))
                .size(12.0)
                .color(egui::Color32::from_rgb(0xf3, 0x8b, 0xa8)),
        );
    }

    ui.add_space(4.0);
    ui.separator();

    if state.controller.listing().is_empty() {
        let hint = if state.is_scanning() {
            "Scanning..."
        } else if state.controller.navigator().is_loading() {
            "Loading..."
        } else {
            "This folder is empty."
        };
        ui.label(egui::RichText::new(hint).size(12.0).color(color_muted));
        return;
    }

    let actions = entry_table(ui, state);
    for action in actions {
        match action {
            RowAction::ToggleAll => state.controller.select_all(),
            RowAction::Toggle(id) => state.controller.toggle_selection(&id),
            RowAction::Open(id) => state.open(&id),
            RowAction::Delete(id) => state.request_delete(&id),
            RowAction::Sort(column) => state.set_sort(column),
        }
    }
}

/// Up button, then one link per path component from the root down.
fn breadcrumb(ui: &mut Ui, state: &mut AppState, current: &Path) {
    let nav = state.controller.navigator();
    let at_root = nav.is_at_root();
    let crumbs: Vec<PathBuf> = match nav.root_path() {
        Some(root) if current.starts_with(root) => current
            .ancestors()
            .take_while(|p| p.starts_with(root))
            .map(Path::to_path_buf)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect(),
        _ => vec![current.to_path_buf()],
    };

    let mut target = None;
    let mut go_up = false;
    ui.horizontal_wrapped(|ui| {
        if ui
            .add_enabled(!at_root, egui::Button::new("⬆ Up"))
            .on_hover_text("Parent folder")
            .clicked()
        {
            go_up = true;
        }
        ui.separator();

        let last = crumbs.len().saturating_sub(1);
        for (i, crumb) in crumbs.iter().enumerate() {
            let label = if i == 0 {
                crumb.display().to_string()
            } else {
                crumb
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default()
            };
            if i == last {
                ui.label(egui::RichText::new(label).strong());
            } else {
                if ui.link(label).clicked() {
                    target = Some(crumb.clone());
                }
                ui.label("›");
            }
        }
    });

    if go_up {
        state.navigate_up();
    } else if let Some(path) = target {
        state.search.clear();
        state.controller.load(path);
    }
}

fn entry_table(ui: &mut Ui, state: &AppState) -> Vec<RowAction> {
    let mut actions = Vec::new();
    let controller = &state.controller;
    let rows = state.visible_entries();
    let total = controller.listing().total_bytes();
    let header = controller.header_state();
    let can_delete = controller.can_delete();
    let muted = ui.visuals().weak_text_color();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::exact(24.0))
        .column(Column::remainder().at_least(160.0).clip(true))
        .column(Column::initial(180.0).at_least(120.0))
        .column(Column::initial(130.0).at_least(90.0))
        .column(Column::initial(70.0).at_least(50.0))
        .column(Column::exact(28.0))
        .header(ROW_HEIGHT, |mut row| {
            row.col(|ui| {
                let mut all = header == HeaderState::All;
                let response = ui.add(
                    egui::Checkbox::without_text(&mut all)
                        .indeterminate(header == HeaderState::Partial),
                );
                if response.clicked() {
                    actions.push(RowAction::ToggleAll);
                }
            });
            for column in [
                SortColumn::Name,
                SortColumn::Size,
                SortColumn::Modified,
                SortColumn::Kind,
            ] {
                row.col(|ui| {
                    let active = state.sort_column == column;
                    let arrow = match (active, state.sort_order) {
                        (false, _) => "",
                        (true, SortOrder::Ascending) => " ⏶",
                        (true, SortOrder::Descending) => " ⏷",
                    };
                    let label = egui::RichText::new(format!("{}{arrow}", column.label())).strong();
                    if ui.selectable_label(active, label).clicked() {
                        actions.push(RowAction::Sort(column));
                    }
                });
            }
            row.col(|_| {});
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let entry = rows[row.index()];
                row.col(|ui| {
                    let mut checked = controller.selection().contains(&entry.id);
                    if ui.checkbox(&mut checked, "").clicked() {
                        actions.push(RowAction::Toggle(entry.id.clone()));
                    }
                });
                row.col(|ui| {
                    if entry.is_dir() {
                        if ui
                            .link(format!("📁 {}", entry.name))
                            .on_hover_text(entry.path.display().to_string())
                            .clicked()
                        {
                            actions.push(RowAction::Open(entry.id.clone()));
                        }
                    } else {
                        ui.label(format!("📄 {}", entry.name))
                            .on_hover_text(entry.path.display().to_string());
                    }
                });
                row.col(|ui| {
                    let pct = percentage(entry.size_bytes, total) as f32;
                    size_bar(ui, pct, 60.0, 10.0);
                    ui.label(entry.size.as_str());
                });
                row.col(|ui| {
                    let modified = entry
                        .last_modified
                        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_default();
                    ui.label(egui::RichText::new(modified).color(muted));
                });
                row.col(|ui| {
                    ui.label(egui::RichText::new(entry.kind_label()).color(muted));
                });
                row.col(|ui| {
                    let tip = if can_delete {
                        "Delete or move to trash"
                    } else {
                        "Deleting is disabled here"
                    };
                    if ui
                        .add_enabled(can_delete, egui::Button::new("🗑").small())
                        .on_hover_text(tip)
                        .on_disabled_hover_text(tip)
                        .clicked()
                    {
                        actions.push(RowAction::Delete(entry.id.clone()));
                    }
                });
            });
        });

    actions
}
