//! Rule storage.
//!
//! The resolver only needs [`RuleStore::fetch_rules`]: every rule for one
//! entity type whose `from_state` is the requested state or the wildcard.
//! The remaining operations are administrative maintenance and are never
//! called while serving a request.

mod in_memory;
pub mod seed;

pub use in_memory::InMemoryRuleStore;

use sysreg_core::error::Result;
use sysreg_core::id::RuleId;
use sysreg_core::types::{EntityType, LifecycleState, Rule};

use crate::model::StoredRule;

/// Trait for rule storage.
pub trait RuleStore: Send + Sync {
    /// Fetch every rule for `entity` that applies in `state`.
    ///
    /// Matches the entity field exactly and the `from_state` field exactly
    /// or as the wildcard 0. No aggregation happens here; an empty result is
    /// a valid answer, an unreachable backend is `StoreError::Unavailable`.
    fn fetch_rules(&self, entity: EntityType, state: LifecycleState) -> Result<Vec<Rule>>;

    /// Add a rule and return the id the store assigned to it.
    ///
    /// Fails with `StoreError::Conflict` if the name is already taken.
    fn add_rule(&self, rule: StoredRule) -> Result<RuleId>;

    /// Get a rule by id.
    fn get_rule(&self, rule_id: RuleId) -> Result<StoredRule>;

    /// Replace an existing mutable rule, keeping its creation time.
    fn update_rule(&self, rule: StoredRule) -> Result<()>;

    /// Remove a mutable rule.
    fn remove_rule(&self, rule_id: RuleId) -> Result<()>;

    /// List all rules, ordered by id.
    fn list_rules(&self) -> Result<Vec<StoredRule>>;
}
