//! Logging utilities.
//!
//! The engine logs through `tracing`. This module only defines the level
//! names accepted on the command line and in configuration files, and the
//! `EnvFilter` directive each one stands for.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Log level, ordered by increasing severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogLevel {
    /// Verbose debug information.
    Trace,

    /// Debug information, including per-rule matching decisions.
    Debug,

    /// Informational messages.
    Info,

    /// Warning messages.
    #[default]
    Warning,

    /// Error messages.
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }

    /// The directive understood by `tracing_subscriber::EnvFilter`.
    pub fn directive(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warn",
            Self::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ParseError;

    /// Case-insensitive; accepts `warn` and `err` as aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" | "err" => Ok(Self::Error),
            _ => Err(ParseError::UnknownLogLevel(s.to_string())),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, ParseError> {
        value.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.directive().to_string()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_str() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("warn").unwrap(), LogLevel::Warning);
        assert_eq!(LogLevel::from_str("err").unwrap(), LogLevel::Error);
        assert!(LogLevel::from_str("loud").is_err());
    }

    #[test]
    fn test_log_level_try_from_string() {
        assert_eq!(LogLevel::try_from("info".to_string()), Ok(LogLevel::Info));
        assert_eq!(
            LogLevel::try_from("loud".to_string()),
            Err(ParseError::UnknownLogLevel("loud".to_string()))
        );
    }

    #[test]
    fn test_directive() {
        assert_eq!(LogLevel::default().directive(), "warn");
        assert_eq!(LogLevel::Debug.directive(), "debug");
        assert_eq!(String::from(LogLevel::Warning), "warn");
    }
}
