mod app;
mod color;
mod config;
mod data;
mod render;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use app::FitViewerApp;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Optional data directory; the three CSV files are read from there.
    let data_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let data = data::loader::load_dataset(&data_dir)
        .with_context(|| format!("loading plot data from {}", data_dir.display()))?;

    let mut state = AppState::new(data_dir);
    state.set_data(data);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config::WINDOW_SIZE)
            .with_min_inner_size(config::MIN_WINDOW_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        "Fit Viewer – Predicted vs Actual",
        options,
        Box::new(|_cc| Ok(Box::new(FitViewerApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the viewer: {e}"))
}
