//! Utility types shared by the engine crates and the CLI.
//!
//! Configuration loading and log level handling.

pub mod config;
pub mod logging;

pub use config::{EngineConfig, RuleConfig};
pub use logging::LogLevel;
