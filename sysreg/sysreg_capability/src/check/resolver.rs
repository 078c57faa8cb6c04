use std::sync::Arc;
use tracing::{debug, trace};

use sysreg_core::error::Result;
use sysreg_core::types::{EntityType, LifecycleState, Relation, Rule};

use super::answer::CapabilityAnswer;
use crate::store::RuleStore;

/// Aggregates matching rules into a [`CapabilityAnswer`].
///
/// Holds no state of its own besides the store handle: every call
/// re-reads the rules and recomputes the answer from scratch.
pub struct CapabilityResolver {
    /// The rule store to use for lookups
    store: Arc<dyn RuleStore>,
}

impl CapabilityResolver {
    /// Creates a new resolver over the specified store
    pub fn new(store: Arc<dyn RuleStore>) -> Self {
        Self { store }
    }

    /// Resolves what `relation` may do with an `entity` in `state`.
    ///
    /// Store failures are propagated; they are never turned into an empty
    /// answer.
    pub fn resolve(
        &self,
        entity: EntityType,
        state: LifecycleState,
        relation: Relation,
    ) -> Result<CapabilityAnswer> {
        let rules = self.store.fetch_rules(entity, state)?;
        Ok(resolve_rules(&rules, entity, state, relation))
    }

    /// Gets a reference to the rule store
    pub fn store(&self) -> &Arc<dyn RuleStore> {
        &self.store
    }
}

/// Folds a candidate rule set into an answer.
///
/// Rules for another entity or another concrete state are skipped, as are
/// rules whose relation set does not include the caller. Everything else is
/// OR-ed together; there is no precedence between rules.
pub fn resolve_rules(
    rules: &[Rule],
    entity: EntityType,
    state: LifecycleState,
    relation: Relation,
) -> CapabilityAnswer {
    let mut answer = CapabilityAnswer::default();

    for rule in rules {
        let decoded = rule.decode();
        if !decoded.applies_to(entity, state, relation) {
            trace!(rule = %rule.name, "rule does not apply");
            continue;
        }

        debug!(
            rule = %rule.name,
            capabilities = ?decoded.capabilities,
            to_state = ?decoded.to_state,
            "rule matched"
        );
        answer.absorb(&decoded, &rule.name);
    }

    debug!(
        entity = %entity,
        state = %state,
        relation = %relation,
        matched = answer.matched_rules.len(),
        capabilities = ?answer.capabilities,
        reachable = ?answer.reachable_states,
        "resolved capabilities"
    );
    answer
}
