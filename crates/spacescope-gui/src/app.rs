/// Main `eframe::App` implementation for SpaceScope.
///
/// This is the top-level UI layout that composes all panels and widgets.
use crate::panels;
use crate::state::AppState;
use crate::widgets;
use spacescope_core::config::Config;

/// Pre-built application state.
///
/// Construct this before calling `eframe::run_native` so volume
/// enumeration is already under way when the first frame renders.
pub struct SpaceScopeState {
    pub(crate) inner: AppState,
}

impl SpaceScopeState {
    /// Build the state for `config` and start listing volumes.
    pub fn build(config: &Config) -> Self {
        let mut state = AppState::from_config(config);
        state.controller.refresh_volumes();
        Self { inner: state }
    }
}

/// The SpaceScope application.
pub struct SpaceScopeApp {
    state: AppState,
}

impl SpaceScopeApp {
    /// Create the application from state built by [`SpaceScopeState::build()`].
    pub fn with_state(cc: &eframe::CreationContext<'_>, state: SpaceScopeState) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        Self { state: state.inner }
    }
}

impl eframe::App for SpaceScopeApp {
    /// Match the GPU clear colour to the panel background.
    fn clear_color(&self, visuals: &egui::Visuals) -> [f32; 4] {
        let [r, g, b, a] = visuals.panel_fill.to_array();
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        // ── Process background messages ───────────────────────────────────
        self.state.process_messages();

        // Workers reply on a channel, so keep polling while anything is
        // outstanding. Toasts also need a tick to expire.
        let busy = self.state.is_scanning()
            || self.state.controller.navigator().is_loading()
            || self.state.controller.volumes_loading()
            || self.state.controller.deletion().is_running()
            || !self.state.controller.notifications().is_empty();
        if busy {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        // ── Top toolbar ───────────────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .min_height(36.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                widgets::toolbar::toolbar(ui, &mut self.state);
                ui.add_space(4.0);
            });

        // ── Dialogs ───────────────────────────────────────────────────────
        widgets::confirm_dialog::confirm_dialog(ctx, &mut self.state);
        widgets::export_dialog::export_dialog(ctx, &mut self.state);
        about_window(ctx, &mut self.state);

        // ── Bottom status bar ─────────────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(24.0)
            .show(ctx, |ui| {
                ui.add_space(2.0);
                widgets::status_bar::status_bar(ui, &self.state);
                ui.add_space(2.0);
            });

        // ── Left sidebar (volumes) ────────────────────────────────────────
        egui::SidePanel::left("volume_panel")
            .default_width(260.0)
            .min_width(200.0)
            .max_width(420.0)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    panels::volume_panel::volume_panel(ui, &mut self.state);
                });
            });

        // ── Right sidebar (chart) ─────────────────────────────────────────
        egui::SidePanel::right("chart_panel")
            .default_width(320.0)
            .min_width(240.0)
            .max_width(520.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::chart_panel::chart_panel(ui, &mut self.state);
            });

        // ── Central panel (listing) ───────────────────────────────────────
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::listing_panel::listing_panel(ui, &mut self.state);
        });

        widgets::toasts::toasts(ctx, &mut self.state);
    }
}

fn about_window(ctx: &egui::Context, state: &mut AppState) {
    let mut show_about = state.show_about;
    egui::Window::new("About SpaceScope")
        .open(&mut show_about)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([320.0, 0.0])
        .show(ctx, |ui| {
            let accent = ui.visuals().hyperlink_color;
            let muted = ui.visuals().weak_text_color();
            let normal = ui.visuals().text_color();

            ui.vertical_centered(|ui| {
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new("SpaceScope")
                        .size(24.0)
                        .strong()
                        .color(accent),
                );
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                        .size(13.0)
                        .color(muted),
                );
                ui.add_space(12.0);
                ui.label(
                    egui::RichText::new(
                        "Scan a drive, browse folders by size\n\
                         and clean up with delete or trash.",
                    )
                    .size(12.0)
                    .color(normal),
                );
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new(format!(
                        "Settings: {}",
                        Config::config_path().display()
                    ))
                    .size(11.0)
                    .color(muted),
                );
                ui.add_space(8.0);
            });
        });
    state.show_about = show_about;
}
