use anyhow::Context;
use eframe::egui;

use spacex_dash::app::SpacexDashApp;
use spacex_dash::config::DashConfig;
use spacex_dash::data::loader;
use spacex_dash::state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashConfig::default();
    let dataset = loader::load_file(&config.data_path).context("starting dashboard")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let payload_step = config.payload_step;
    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(SpacexDashApp::new(AppState::new(
                dataset,
                payload_step,
            ))))
        }),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}
