//! Vigil CLI - Interactive front end for the Vigil watched store.

use anyhow::Context;
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use vigil_cli::{repl, Cli, Command, Config, ConsoleFrontEnd, Formatter};
use vigil_sdk::Vigil;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing (log to stderr so alerts and output stay clean)
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .context("Invalid log level")?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    // Load or create config
    let mut config = match &cli.config {
        Some(path) => Config::load_from(Path::new(path))
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => match Config::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Using default configuration: {}", e);
                Config::default()
            }
        },
    };

    if cli.config.is_none() {
        if let Ok(path) = Config::path() {
            if !path.exists() && config.save().is_err() {
                tracing::debug!("Could not write default config to {}", path.display());
            }
        }
    }

    // Override poll interval if specified
    if let Some(interval) = cli.poll_interval_ms {
        config.vigil.watcher.poll_interval_ms = interval;
    }

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    let reference = config.reference_color()?;
    let mut vigil = Vigil::new(config.vigil.clone()).context("Invalid store configuration")?;
    vigil
        .initialize(Arc::new(ConsoleFrontEnd::stdout(reference, color_enabled)))
        .context("Failed to start the store watcher")?;

    // Handle commands
    let outcome = match cli.command {
        None | Some(Command::Repl) => repl::run_repl(&vigil, &config, &formatter),
    };

    vigil.finalize();
    outcome?;

    Ok(())
}
