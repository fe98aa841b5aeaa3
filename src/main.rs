//! HRnet - Desktop employee register.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use hrnet as app;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use app::config::{AppConfig, ConfigLoadResult, MIN_WINDOW_SIZE};
use app::store::{FileStorage, PersistedStore};
use app::ui::App;

/// Desktop employee register.
#[derive(Parser)]
#[command(name = "hrnet")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Override the data directory holding saved employees and logs
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Delete all saved employees and exit
    #[arg(long)]
    clear_storage: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Determine config path based on mode
    let config_path = if cli.dev {
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };
    let config_result = AppConfig::try_load(&config_path);

    // Config may be unreadable, so the data dir comes from defaults in that case
    let data_dir = match (&cli.data_dir, &config_result) {
        (Some(dir), _) => dir.clone(),
        (None, ConfigLoadResult::Loaded(config)) => config.storage.resolve_data_dir(),
        (None, _) => app::config::default_data_dir(),
    };

    let _log_guard = init_logging(&data_dir);

    tracing::info!("HRnet starting...");
    tracing::info!("Config path: {:?}", config_path);
    tracing::info!("Data directory: {:?}", data_dir);

    let config = match config_result {
        ConfigLoadResult::Loaded(config) => {
            tracing::info!("Config loaded successfully");
            config
        }
        ConfigLoadResult::Missing => {
            tracing::info!("Config missing, writing defaults to {:?}", config_path);
            let config = AppConfig::default();
            if let Err(e) = config.save(&config_path) {
                tracing::warn!("Failed to write default config: {}", e);
            }
            config
        }
        ConfigLoadResult::Invalid(e) => {
            tracing::warn!("Config invalid, using defaults: {}", e);
            AppConfig::default()
        }
    };

    let mut store = PersistedStore::open(FileStorage::new(&data_dir));

    if cli.clear_storage {
        store.clear().context("Failed to clear saved employees")?;
        return Ok(());
    }

    run_app(config, store)
}

/// Log to stdout and to a daily file under `<data_dir>/logs`.
fn init_logging(data_dir: &Path) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(data_dir.join("logs"), "hrnet.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    guard
}

/// Run the main application window.
fn run_app(config: AppConfig, store: PersistedStore<FileStorage>) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("HRnet")
            .with_inner_size([config.ui.window_width, config.ui.window_height])
            .with_min_inner_size(MIN_WINDOW_SIZE),
        ..Default::default()
    };

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;

    eframe::run_native(
        "HRnet",
        options,
        Box::new(|cc| Ok(Box::new(App::new(&cc.egui_ctx, store, config, rt)))),
    )
    .map_err(|e| anyhow::anyhow!("Window error: {e}"))
}
