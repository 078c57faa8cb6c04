//! Wiring between the CLI and the engine crates.
//!
//! Loads configuration, installs the log subscriber and builds the rule
//! store every command works against.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sysreg_capability::store::InMemoryRuleStore;
use sysreg_core::utils::{EngineConfig, LogLevel};

/// Reads the config file if one was given, otherwise uses defaults.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

/// Installs a stderr subscriber.
///
/// Level precedence: `--log-level`, then `RUST_LOG`, then the config file,
/// then warn.
pub fn init_logging(cli_level: Option<LogLevel>, config: &EngineConfig) {
    let filter = match cli_level {
        Some(level) => EnvFilter::new(level.directive()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(config.log_level.unwrap_or_default().directive())
        }),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Builds the rule store described by the config.
pub fn build_store(config: &EngineConfig) -> Result<InMemoryRuleStore> {
    let store = InMemoryRuleStore::from_config(config).context("building rule store")?;
    info!(
        rules = store.len(),
        seeded = config.seed_defaults,
        "rule store ready"
    );
    Ok(store)
}

/// Writes `value` to stdout as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serializing output")?;
    println!("{}", json);
    Ok(())
}
