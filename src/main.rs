use anyhow::{Context, Result};
use clap::Parser;
use splashload::app::{run_headless, SplashApp};
use splashload::cli::{Cli, Commands, ThemeAction};
use splashload::config::AppConfig;
use splashload::progress::ProgressController;
use splashload::splash::SplashScreen;
use splashload::store::FileStore;
use splashload::theme::{EnvPreference, ThemeController};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    cli.progress.apply(&mut config.progress);
    config.validate()?;

    init_tracing(cli.debug, command == Commands::Run)?;

    match command {
        Commands::Run => {
            let store = FileStore::open(config.store_path()?)?;
            let themes = ThemeController::load(store, &EnvPreference);
            let controller = ProgressController::with_completion_callback(config.progress.clone(), || {
                tracing::info!("Application loaded");
            })?;

            let mut app = SplashApp::new(controller, themes, SplashScreen::default());
            app.run().await
        }
        Commands::Simulate { json } => {
            let controller = ProgressController::new(config.progress.clone())?;
            let snapshot = run_headless(&controller, json).await?;
            tracing::info!(progress = snapshot.progress, "Simulation finished");
            Ok(())
        }
        Commands::Theme { action } => {
            let store = FileStore::open(config.store_path()?)?;
            let mut themes = ThemeController::load(store, &EnvPreference);
            if action == ThemeAction::Toggle {
                themes.toggle()?;
            }
            println!("{}", themes.mode());
            Ok(())
        }
    }
}

fn init_tracing(debug_mode: bool, to_file: bool) -> Result<()> {
    // Set log level based on debug flag
    let log_level = if debug_mode {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    if to_file {
        // The splash owns the terminal, so logs go to a file
        let log_path = AppConfig::log_file_path()?;
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
        }
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(log_file))
            .with_ansi(false)
            .with_max_level(log_level)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(log_level)
            .init();
    }

    if debug_mode {
        tracing::info!("Debug mode enabled - verbose logging active");
    }
    Ok(())
}
