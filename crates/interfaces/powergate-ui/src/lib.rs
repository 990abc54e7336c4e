mod app;
mod components;
mod screens;
mod theme;
mod utils;

use powergate_app_core::async_runtime;
use powergate_app_core::persistence::FilePersistence;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

pub fn run() -> eframe::Result<()> {
    setup_logging();

    let runtime = match async_runtime::runtime() {
        Ok(rt) => rt.handle().clone(),
        Err(e) => {
            tracing::error!("Failed to start async runtime: {e:#}");
            return Err(eframe::Error::AppCreation(e.into()));
        }
    };

    let persistence = FilePersistence::new();
    let settings = persistence.load_settings().unwrap_or_else(|e| {
        tracing::error!("Failed to load settings, using defaults: {e:#}");
        Default::default()
    });

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([640.0, 420.0])
            .with_min_inner_size([480.0, 320.0])
            .with_title("POWERGATE"),
        ..Default::default()
    };

    eframe::run_native(
        "Powergate",
        options,
        Box::new(move |cc| {
            theme::setup(&cc.egui_ctx);
            Ok(Box::new(app::PowerUiApp::new(runtime, persistence, settings)))
        }),
    )
}
