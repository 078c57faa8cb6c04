//! In-memory rule store.

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

use sysreg_core::codec::{extract, Field};
use sysreg_core::error::{Result, StoreError};
use sysreg_core::id::RuleId;
use sysreg_core::types::{EntityType, LifecycleState, Rule};
use sysreg_core::utils::EngineConfig;

use super::{seed, RuleStore};
use crate::model::StoredRule;

/// An in-memory rule store.
///
/// Cloning is cheap and clones share the same rules.
#[derive(Clone)]
pub struct InMemoryRuleStore {
    /// The rules, indexed by ID.
    rules: Arc<DashMap<RuleId, StoredRule>>,

    /// Rule names, for uniqueness.
    names: Arc<DashMap<String, RuleId>>,

    next_id: Arc<AtomicU64>,

    /// Simulates the backing database going away.
    offline: Arc<AtomicBool>,
}

impl InMemoryRuleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            rules: Arc::new(DashMap::new()),
            names: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicU64::new(1)),
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a store holding the immutable default rules.
    pub fn with_defaults() -> Result<Self> {
        let store = Self::new();
        for rule in seed::default_rules() {
            store.add_rule(rule)?;
        }
        Ok(store)
    }

    /// Create a store from configuration: the defaults if enabled, then
    /// every configured rule.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let store = if config.seed_defaults {
            Self::with_defaults()?
        } else {
            Self::new()
        };

        for entry in &config.rules {
            let rule = entry.to_rule()?;
            let stored = StoredRule::new(rule.value, rule.name)
                .with_description(entry.description.clone().unwrap_or_default())
                .with_logic(entry.logic);
            store.add_rule(stored)?;
        }
        Ok(store)
    }

    /// Marks the store as reachable or not. While offline every operation
    /// fails with `StoreError::Unavailable`.
    pub fn set_available(&self, available: bool) {
        self.offline.store(!available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("rule store is offline".to_string()).into());
        }
        Ok(())
    }

    /// Number of rules currently stored.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for InMemoryRuleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleStore for InMemoryRuleStore {
    fn fetch_rules(&self, entity: EntityType, state: LifecycleState) -> Result<Vec<Rule>> {
        self.ensure_available()?;

        let mut matching: Vec<(RuleId, Rule)> = self
            .rules
            .iter()
            .filter(|entry| {
                let value = entry.value().value;
                let from = extract(value, Field::FromState);
                extract(value, Field::Entity) == entity.code() && (from == 0 || from == state.code())
            })
            .map(|entry| (*entry.key(), entry.value().rule()))
            .collect();
        matching.sort_by_key(|(id, _)| *id);

        debug!(
            entity = %entity,
            state = %state,
            count = matching.len(),
            "fetched rules"
        );
        Ok(matching.into_iter().map(|(_, rule)| rule).collect())
    }

    fn add_rule(&self, mut rule: StoredRule) -> Result<RuleId> {
        self.ensure_available()?;

        let id = match self.names.entry(rule.name.clone()) {
            Entry::Occupied(_) => {
                return Err(
                    StoreError::Conflict(format!("rule '{}' already exists", rule.name)).into(),
                );
            }
            Entry::Vacant(slot) => {
                let id = RuleId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
                slot.insert(id);
                id
            }
        };

        rule.id = id;
        if !rule.immutable {
            info!(rule_id = %id, name = %rule.name, value = rule.value, "rule added");
        }
        self.rules.insert(id, rule);
        Ok(id)
    }

    fn get_rule(&self, rule_id: RuleId) -> Result<StoredRule> {
        self.ensure_available()?;

        let rule = self
            .rules
            .get(&rule_id)
            .ok_or(StoreError::RuleNotFound(rule_id))?
            .clone();
        Ok(rule)
    }

    fn update_rule(&self, mut rule: StoredRule) -> Result<()> {
        self.ensure_available()?;

        let existing = self.get_rule(rule.id)?;
        if existing.immutable {
            return Err(StoreError::ImmutableRule(existing.name).into());
        }

        if rule.name != existing.name {
            match self.names.entry(rule.name.clone()) {
                Entry::Occupied(_) => {
                    return Err(StoreError::Conflict(format!(
                        "rule '{}' already exists",
                        rule.name
                    ))
                    .into());
                }
                Entry::Vacant(slot) => {
                    slot.insert(rule.id);
                }
            }
            self.names.remove(&existing.name);
        }

        rule.immutable = false;
        rule.created_at = existing.created_at;
        rule.updated_at = Utc::now();
        info!(rule_id = %rule.id, name = %rule.name, value = rule.value, "rule updated");
        self.rules.insert(rule.id, rule);
        Ok(())
    }

    fn remove_rule(&self, rule_id: RuleId) -> Result<()> {
        self.ensure_available()?;

        let existing = self.get_rule(rule_id)?;
        if existing.immutable {
            return Err(StoreError::ImmutableRule(existing.name).into());
        }

        self.rules.remove(&rule_id);
        self.names.remove(&existing.name);
        info!(rule_id = %rule_id, name = %existing.name, "rule removed");
        Ok(())
    }

    fn list_rules(&self) -> Result<Vec<StoredRule>> {
        self.ensure_available()?;

        let mut rules: Vec<StoredRule> = self.rules.iter().map(|r| r.value().clone()).collect();
        rules.sort_by_key(|rule| rule.id);
        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sysreg_core::codec::{Capabilities, RelationSet};
    use sysreg_core::error::Error;
    use sysreg_core::types::RuleSpec;

    fn post_rule(from: Option<LifecycleState>) -> u32 {
        let mut spec = RuleSpec::new(EntityType::Post)
            .grant(Capabilities::READ)
            .relations(RelationSet::MEMBER);
        if let Some(state) = from {
            spec = spec.from_state(state);
        }
        spec.pack().unwrap()
    }

    #[test]
    fn test_add_and_get_rule() {
        let store = InMemoryRuleStore::new();
        let id = store
            .add_rule(StoredRule::new(post_rule(None), "post_any_read"))
            .unwrap();

        let retrieved = store.get_rule(id).unwrap();
        assert_eq!(retrieved.id, id);
        assert_eq!(retrieved.name, "post_any_read");
        assert!(!retrieved.immutable);
    }

    #[test]
    fn test_duplicate_name_conflicts() {
        let store = InMemoryRuleStore::new();
        store.add_rule(StoredRule::new(1, "dup")).unwrap();
        let result = store.add_rule(StoredRule::new(2, "dup"));
        assert!(matches!(result, Err(Error::Store(StoreError::Conflict(_)))));
    }

    #[test]
    fn test_fetch_filters_entity_and_state() {
        let store = InMemoryRuleStore::new();
        store
            .add_rule(StoredRule::new(post_rule(None), "any_state"))
            .unwrap();
        store
            .add_rule(StoredRule::new(
                post_rule(Some(LifecycleState::Draft)),
                "draft_only",
            ))
            .unwrap();
        let event = RuleSpec::new(EntityType::Event)
            .grant(Capabilities::READ)
            .relations(RelationSet::ALL)
            .pack()
            .unwrap();
        store.add_rule(StoredRule::new(event, "event_any")).unwrap();

        let names = |state| -> Vec<String> {
            store
                .fetch_rules(EntityType::Post, state)
                .unwrap()
                .into_iter()
                .map(|rule| rule.name)
                .collect()
        };

        assert_eq!(names(LifecycleState::Draft), vec!["any_state", "draft_only"]);
        assert_eq!(names(LifecycleState::Released), vec!["any_state"]);
    }

    #[test]
    fn test_update_and_remove() {
        let store = InMemoryRuleStore::new();
        let id = store.add_rule(StoredRule::new(1, "old_name")).unwrap();

        let mut rule = store.get_rule(id).unwrap();
        rule.name = "new_name".to_string();
        rule.value = 2;
        store.update_rule(rule).unwrap();

        let updated = store.get_rule(id).unwrap();
        assert_eq!(updated.value, 2);
        assert!(updated.updated_at >= updated.created_at);

        // The old name is free again.
        store.add_rule(StoredRule::new(3, "old_name")).unwrap();

        store.remove_rule(id).unwrap();
        assert!(matches!(
            store.get_rule(id),
            Err(Error::Store(StoreError::RuleNotFound(_)))
        ));
    }

    #[test]
    fn test_default_rules_are_immutable() {
        let store = InMemoryRuleStore::with_defaults().unwrap();
        let first = store.list_rules().unwrap().remove(0);
        assert!(first.immutable);

        let removed = store.remove_rule(first.id);
        assert!(matches!(
            removed,
            Err(Error::Store(StoreError::ImmutableRule(_)))
        ));

        let mut edited = first.clone();
        edited.value = 0;
        assert!(matches!(
            store.update_rule(edited),
            Err(Error::Store(StoreError::ImmutableRule(_)))
        ));
        assert_eq!(store.get_rule(first.id).unwrap().value, first.value);
    }

    #[test]
    fn test_offline_store_is_unavailable() {
        let store = InMemoryRuleStore::new();
        store.set_available(false);

        let result = store.fetch_rules(EntityType::Post, LifecycleState::Draft);
        assert!(matches!(
            result,
            Err(Error::Store(StoreError::Unavailable(_)))
        ));

        store.set_available(true);
        assert!(store
            .fetch_rules(EntityType::Post, LifecycleState::Draft)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_from_config() {
        let config = EngineConfig::from_toml_str(
            r#"
            seed_defaults = false

            [[rules]]
            name = "partner_comment"
            description = "Partners can comment on drafts"
            logic = "alternative"
            entity = "post"
            from = "draft"
            capabilities = ["update_comment"]
            relations = ["partner"]
            "#,
        )
        .unwrap();

        let store = InMemoryRuleStore::from_config(&config).unwrap();
        let rules = store.list_rules().unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].description, "Partners can comment on drafts");
        assert_eq!(rules[0].logic, sysreg_core::types::RuleLogic::Alternative);
        assert!(!rules[0].immutable);
    }
}
