mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::TrafficApp;
use eframe::egui;
use state::{AppState, ViewMode};

fn main() -> eframe::Result {
    env_logger::init();

    let mut view_mode = ViewMode::Full;
    let mut path: Option<PathBuf> = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--compact" => view_mode = ViewMode::Compact,
            other => path = Some(PathBuf::from(other)),
        }
    }

    // No path on the command line: ask once via the native file dialog.
    let path = path.or_else(|| {
        rfd::FileDialog::new()
            .set_title("Open traffic dataset")
            .add_filter("Supported files", &["csv", "json"])
            .add_filter("CSV", &["csv"])
            .add_filter("JSON", &["json"])
            .pick_file()
    });
    let Some(path) = path else {
        log::error!("No dataset file selected");
        std::process::exit(1);
    };

    // The one and only load; any failure here is fatal.
    let dataset = match data::loader::load_file(&path) {
        Ok(dataset) => dataset,
        Err(e) => {
            log::error!("Failed to load {}: {e}", path.display());
            std::process::exit(1);
        }
    };
    log::info!(
        "Loaded {} observations across {} cities ({} – {})",
        dataset.len(),
        dataset.cities.len(),
        dataset.date_min,
        dataset.date_max
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Traffic Insights Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(TrafficApp::new(AppState::new(dataset, view_mode))))),
    )
}
