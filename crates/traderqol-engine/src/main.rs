//! Command-line host for the TraderQoL economy transformer.
//!
//! Loads the settings document and a game database directory, runs one
//! transform pass over the traders and quests, and prints the pass report
//! as JSON on stdout. The transformed records stay in memory; nothing is
//! written back to the database.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load settings from `$TRADERQOL_CONFIG` (default `config/config.jsonc`)
//! 3. Load the database from `$TRADERQOL_DATABASE` (default `database`)
//! 4. Run the transform pass
//! 5. Print the report

mod database;
mod error;

use std::path::{Path, PathBuf};

use tracing::info;
use tracing_subscriber::EnvFilter;
use traderqol_core::Configuration;

use crate::error::EngineError;

/// Environment variable naming the settings document.
const CONFIG_ENV: &str = "TRADERQOL_CONFIG";

/// Environment variable naming the database directory.
const DATABASE_ENV: &str = "TRADERQOL_DATABASE";

const DEFAULT_CONFIG_PATH: &str = "config/config.jsonc";
const DEFAULT_DATABASE_PATH: &str = "database";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the settings or the database cannot be loaded.
fn main() -> Result<(), EngineError> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("traderqol-engine starting");

    // 2. Load settings.
    let config_path = env_path(CONFIG_ENV, DEFAULT_CONFIG_PATH);
    let config = load_config(&config_path)?;
    info!(
        path = %config_path.display(),
        single_currency = config.single_currency_settings.enabled,
        target_currency = %config.single_currency_settings.target_currency,
        price_multiplier = config.price_multiplier.value(),
        "Configuration loaded"
    );

    // 3. Load the database.
    let database_path = env_path(DATABASE_ENV, DEFAULT_DATABASE_PATH);
    let mut dataset = database::load_dataset(&database_path)?;

    // 4. Transform.
    let report = traderqol_core::run(&mut dataset, &config);

    // 5. Report.
    let json =
        serde_json::to_string_pretty(&report).map_err(|source| EngineError::Report { source })?;
    println!("{json}");

    Ok(())
}

/// A path from the environment, or the default when unset.
fn env_path(var: &str, default: &str) -> PathBuf {
    std::env::var_os(var).map_or_else(|| PathBuf::from(default), PathBuf::from)
}

/// Load the settings document. A missing or incomplete file is an error.
fn load_config(path: &Path) -> Result<Configuration, EngineError> {
    Ok(Configuration::from_file(path)?)
}
