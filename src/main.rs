pub mod assets;
pub mod codec;
pub mod config;
pub mod controls;
pub mod layout;
pub mod render;
pub mod state;
pub mod ui;

use crate::config::AppConfig;
use crate::render::Renderer;
use crate::state::session::AnnotatorSession;
use crate::ui::PadlabelUI;
use color_eyre::{eyre::eyre, Result};
use eframe::egui;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let config_path = std::env::var_os("PADLABEL_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(AppConfig::default_path);
    let config = AppConfig::load_or_create(&config_path).await?;

    info!("Initializing diagram with configured defaults");
    let mut session = AnnotatorSession::new(config.defaults.initial_state());
    if !config.defaults.code.is_empty() && session.load_code(&config.defaults.code).is_err() {
        warn!("Startup code in {} ignored", config_path.display());
    }

    // Bilder im Hintergrund laden
    let image_receiver = assets::spawn_loader(config.assets.dir.clone());
    let renderer = Renderer::new(config.render.clone());

    info!("Starting UI");
    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = egui::ViewportBuilder::default()
        .with_title("Padlabel")
        .with_inner_size([config.window.width, config.window.height]);

    eframe::run_native(
        "Padlabel",
        native_options,
        Box::new(|cc| {
            Ok(Box::new(PadlabelUI::new(
                cc,
                session,
                renderer,
                image_receiver,
            )))
        }),
    )
    .map_err(|e| eyre!("UI terminated with an error: {}", e))?;

    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
