mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::SalaryPandaApp;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    // Load once before the first frame; the dashboard stays hidden on failure.
    let mut state = AppState::default();
    ui::panels::load_remote(&mut state);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config::WINDOW_SIZE)
            .with_min_inner_size(config::WINDOW_MIN_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        "Dashboard de Salários en el Área de Datos",
        options,
        Box::new(|_cc| Ok(Box::new(SalaryPandaApp::new(state)))),
    )
}
