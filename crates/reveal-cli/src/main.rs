//! Reveal - navigate content services from the terminal.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reveal_cli::connectors::register_builtin;
use reveal_cli::credentials::FileCredentialStore;
use reveal_cli::terminal::RustylineTerminal;
use reveal_core::AppConfig;
use reveal_engine::{ConnectorRegistry, EngineError, Navigator};

#[derive(Debug, Parser)]
#[command(name = "reveal", version, about = "Navigate content services from the terminal")]
struct Args {
    /// Configuration file. Defaults to config.toml in the Reveal config directory.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset, e.g. "debug" or "reveal_engine=debug".
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,
}

/// Logs go to stderr so they never interleave with the screen.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(args: &Args) -> Result<AppConfig, String> {
    let config = match &args.config {
        Some(path) => AppConfig::load(path),
        None => AppConfig::load_default(),
    };
    config.map_err(|e| format!("Failed to load configuration: {}", e))
}

fn run(config: AppConfig) -> Result<(), String> {
    let registry = Arc::new(ConnectorRegistry::new());
    register_builtin(&registry, &config).map_err(|e| e.to_string())?;

    let directory = config
        .credentials_dir()
        .ok_or("Could not determine the credentials directory")?;
    let credentials = FileCredentialStore::new(directory);
    tracing::debug!("Credentials directory: {}", credentials.directory().display());

    let terminal = RustylineTerminal::new().map_err(|e| e.to_string())?;
    let mut navigator = Navigator::new(
        terminal,
        registry,
        Box::new(credentials),
        config.display.clone(),
    );

    match navigator.connect() {
        Ok(()) => {}
        Err(EngineError::InputClosed) => return Ok(()),
        Err(e) => return Err(e.to_string()),
    }
    navigator.run().map_err(|e| e.to_string())
}

fn main() {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let filter = args.log_level.as_deref().unwrap_or(&config.logging.level);
    init_tracing(filter);
    tracing::info!("Reveal starting...");

    if let Err(e) = run(config) {
        tracing::error!("Session failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
