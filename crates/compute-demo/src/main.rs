//! GL compute demo: a compute kernel's procedural image drawn inside an egui
//! panel through a draw-list callback.
//!
//! Set `RUST_LOG=compute_bridge=trace` to follow every frame's pass.

mod app;
mod config;
mod host;

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

use crate::app::ComputeDemoApp;
use crate::config::AppConfig;

fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    let config = AppConfig::default();
    init_logging(&config);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window_title.clone())
            .with_inner_size(config.window_size),
        renderer: eframe::Renderer::Glow,
        ..Default::default()
    };

    let bridge_config = config.bridge.clone();
    eframe::run_native(
        &config.window_title,
        native_options,
        Box::new(move |cc| match app::setup(cc, &bridge_config) {
            Ok(frames) => Box::new(ComputeDemoApp::new(frames)) as Box<dyn eframe::App>,
            Err(err) => app::exit_on_setup_error(err),
        }),
    )
    .map_err(|e| anyhow!("eframe failed: {e}"))
}
