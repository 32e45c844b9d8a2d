//! Event Insight - Registration Spreadsheet Analysis & Chart Viewer
//!
//! A Rust application for charting event registration data and summarizing
//! grant participation and engagement.

mod analysis;
mod charts;
mod config;
mod data;
mod gui;
mod locale;
mod logging;
mod stats;

use config::AppConfig;
use eframe::egui;
use gui::EventInsightApp;

fn main() -> anyhow::Result<()> {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    logging::init_logging(&config.log_filter)?;
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "ignoring config file, using defaults");
    }

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([900.0, 600.0])
            .with_title("Event Insight"),
        ..Default::default()
    };

    tracing::info!("starting Event Insight");

    // Run the application
    eframe::run_native(
        "Event Insight",
        options,
        Box::new(move |cc| Ok(Box::new(EventInsightApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("UI failed: {}", e))
}
