mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{Context, Result};
use app::GenreDashApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_args(std::env::args_os());

    // Without a table there is nothing to chart: fail before opening a window.
    let table = data::loader::load_file(&config.dataset_path, config.normalize)
        .inspect_err(|e| log::error!("Failed to load dataset: {e:#}"))
        .with_context(|| format!("cannot start without {}", config.dataset_path.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Genre Popularity by Year Range")
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    let mut state = AppState::new(config.clone());
    state.set_dataset(table, config.dataset_path);

    eframe::run_native(
        "Genre Dash – Genre Popularity",
        options,
        Box::new(|_cc| Ok(Box::new(GenreDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
