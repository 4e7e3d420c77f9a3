//! SpaceScope -- visual disk space explorer.
//!
//! Thin binary entry point. All logic lives in the `spacescope-core`
//! and `spacescope-gui` crates.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use spacescope_core::config::Config;

fn main() -> anyhow::Result<()> {
    // The log level comes from the config, so a bad config file can only be
    // reported once the subscriber is installed.
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    tracing_subscriber::fmt()
        .with_max_level(config.logging.tracing_level())
        .init();

    if let Some(e) = config_error {
        tracing::warn!("Ignoring configuration: {e:#}");
    }

    tracing::info!(
        "SpaceScope starting (config {})",
        Config::config_path().display()
    );

    // Build application state before opening the window so volume
    // enumeration is already running when the first frame is drawn.
    let state = spacescope_gui::SpaceScopeState::build(&config);

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("SpaceScope -- Disk Space Explorer")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceScope",
        options,
        Box::new(|cc| {
            Ok(Box::new(spacescope_gui::SpaceScopeApp::with_state(
                cc, state,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}
