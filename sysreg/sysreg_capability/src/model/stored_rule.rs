//! A rule row as kept by a rule store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use sysreg_core::id::RuleId;
use sysreg_core::types::{DecodedRule, Rule, RuleLogic};

/// A persisted rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRule {
    /// Assigned by the store on insert.
    pub id: RuleId,

    /// The packed rule integer.
    pub value: u32,

    /// Unique display name.
    pub name: String,

    pub description: String,

    /// Happy-path step or alternative action.
    pub logic: RuleLogic,

    /// Seed rules cannot be edited or removed.
    pub immutable: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl StoredRule {
    /// Create a mutable rule. The id is replaced when the rule is added to a store.
    pub fn new(value: u32, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: RuleId::new(0),
            value,
            name: name.into(),
            description: String::new(),
            logic: RuleLogic::Primary,
            immutable: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_logic(mut self, logic: RuleLogic) -> Self {
        self.logic = logic;
        self
    }

    /// Marks this rule as a default that administrators cannot change.
    pub fn immutable(mut self) -> Self {
        self.immutable = true;
        self
    }

    /// The `{value, name}` pair the resolver consumes.
    pub fn rule(&self) -> Rule {
        Rule::new(self.value, self.name.clone())
    }

    pub fn decode(&self) -> DecodedRule {
        DecodedRule::from_value(self.value)
    }
}

impl fmt::Display for StoredRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} ({})", self.id, self.name, self.decode())
    }
}
