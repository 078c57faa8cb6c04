//! Engine configuration.
//!
//! A TOML file selects the log level, whether the built-in seed rules are
//! loaded, and any extra rules:
//!
//! ```toml
//! log_level = "info"
//! seed_defaults = true
//!
//! [[rules]]
//! name = "draft_comment_partner"
//! entity = "post"
//! from = "draft"
//! capabilities = ["read", "update_comment"]
//! relations = ["partner"]
//!
//! [[rules]]
//! name = "legacy_value"
//! value = 1048579360
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::codec::{Capabilities, RelationSet};
use crate::error::{ConfigError, Result};
use crate::types::{Capability, EntityType, LifecycleState, Relation, Rule, RuleLogic, RuleSpec};
use crate::utils::logging::LogLevel;

fn default_seed_defaults() -> bool {
    true
}

/// Top-level configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Log level used when neither the command line nor `RUST_LOG` set one
    #[serde(default)]
    pub log_level: Option<LogLevel>,

    /// Load the immutable default rule set
    #[serde(default = "default_seed_defaults")]
    pub seed_defaults: bool,

    /// Additional administrator rules
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            seed_defaults: true,
            rules: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a configuration document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()).into());
        }
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Checks that every configured rule packs and that names are unique.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for rule in &self.rules {
            if !seen.insert(rule.name.as_str()) {
                return Err(ConfigError::InvalidRule {
                    name: rule.name.clone(),
                    reason: "duplicate rule name".to_string(),
                }
                .into());
            }
            rule.to_rule()?;
        }
        Ok(())
    }
}

/// One `[[rules]]` entry, given either as a raw `value` or symbolically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub logic: RuleLogic,

    /// Pre-packed rule integer
    #[serde(default)]
    pub value: Option<u32>,

    #[serde(default)]
    pub entity: Option<EntityType>,

    #[serde(default)]
    pub scope: Option<u32>,

    #[serde(default)]
    pub from: Option<LifecycleState>,

    #[serde(default)]
    pub to: Option<LifecycleState>,

    #[serde(default)]
    pub capabilities: Vec<Capability>,

    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl RuleConfig {
    fn has_symbolic_fields(&self) -> bool {
        self.entity.is_some()
            || self.scope.is_some()
            || self.from.is_some()
            || self.to.is_some()
            || !self.capabilities.is_empty()
            || !self.relations.is_empty()
    }

    fn invalid(&self, reason: &str) -> ConfigError {
        ConfigError::InvalidRule {
            name: self.name.clone(),
            reason: reason.to_string(),
        }
    }

    /// Packs this entry into a rule.
    pub fn to_rule(&self) -> Result<Rule> {
        if self.name.trim().is_empty() {
            return Err(self.invalid("rule name is empty").into());
        }

        if let Some(value) = self.value {
            if self.has_symbolic_fields() {
                return Err(self
                    .invalid("give either `value` or symbolic fields, not both")
                    .into());
            }
            return Ok(Rule::new(value, self.name.clone()));
        }

        let entity = self
            .entity
            .ok_or_else(|| self.invalid("missing `entity` (or `value`)"))?;
        if self.relations.is_empty() {
            return Err(self.invalid("rule applies to no relation").into());
        }

        let mut spec = RuleSpec::new(entity)
            .scope(self.scope.unwrap_or(0))
            .grant(self.capabilities.iter().copied().collect::<Capabilities>())
            .relations(self.relations.iter().copied().collect::<RelationSet>());
        if let Some(from) = self.from {
            spec = spec.from_state(from);
        }
        if let Some(to) = self.to {
            spec = spec.to_state(to);
        }

        Ok(Rule::new(spec.pack()?, self.name.clone()))
    }
}
