use std::sync::Arc;
use tracing::debug;

use sysreg_capability::check::{CapabilityAnswer, CapabilityResolver};
use sysreg_capability::store::RuleStore;
use sysreg_core::error::{Result, TransitionError};
use sysreg_core::types::{EntityCategory, EntityType, LifecycleState, Relation};

use crate::engine::validate_transition;

/// Authorizes a state change on both grounds: the category's transition
/// table with its relation gate, and the rules' reachable states.
pub struct TransitionGate {
    resolver: CapabilityResolver,
}

impl TransitionGate {
    pub fn new(store: Arc<dyn RuleStore>) -> Self {
        Self {
            resolver: CapabilityResolver::new(store),
        }
    }

    /// Checks the table first, then the rules for `entity`.
    ///
    /// On success returns the caller's answer in the current state.
    pub fn authorize(
        &self,
        category: EntityCategory,
        entity: EntityType,
        from: LifecycleState,
        to: LifecycleState,
        relation: Relation,
    ) -> Result<CapabilityAnswer> {
        validate_transition(category, from, to, relation)?;

        let answer = self.resolver.resolve(entity, from, relation)?;
        if !answer.can_reach(to) {
            debug!(%entity, %from, %to, %relation, "no rule makes target reachable");
            return Err(TransitionError::NotPermitted {
                entity,
                from,
                to,
                relation,
            }
            .into());
        }

        Ok(answer)
    }

    /// Same as [`authorize`](Self::authorize) for categories whose records
    /// are governed by rules of the matching entity type.
    pub fn authorize_category(
        &self,
        category: EntityCategory,
        from: LifecycleState,
        to: LifecycleState,
        relation: Relation,
    ) -> Result<CapabilityAnswer> {
        match category.entity_type() {
            Some(entity) => self.authorize(category, entity, from, to, relation),
            None => {
                validate_transition(category, from, to, relation)?;
                Ok(CapabilityAnswer::default())
            }
        }
    }

    pub fn resolver(&self) -> &CapabilityResolver {
        &self.resolver
    }
}
