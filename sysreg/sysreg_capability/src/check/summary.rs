use serde::{Deserialize, Serialize};

use sysreg_core::codec::Capabilities;
use sysreg_core::error::Result;
use sysreg_core::types::{EntityType, LifecycleState, Relation};

use super::resolver::CapabilityResolver;

/// How one relation's capabilities change across a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationDelta {
    pub relation: Relation,

    /// Granted in the target state but not in the current one
    pub gained: Capabilities,

    /// Granted in the current state but not in the target one
    pub lost: Capabilities,

    /// Whether this relation's rules make the target reachable
    pub can_transition: bool,
}

/// Effect of moving an entity from one state to another, for every relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionSummary {
    pub entity: EntityType,
    pub from: LifecycleState,
    pub to: LifecycleState,

    /// One entry per relation, lowest priority first
    pub relations: Vec<RelationDelta>,

    /// Relations whose rules allow the transition
    pub reachable_by: Vec<Relation>,
}

impl TransitionSummary {
    pub fn delta(&self, relation: Relation) -> Option<&RelationDelta> {
        self.relations.iter().find(|delta| delta.relation == relation)
    }
}

impl CapabilityResolver {
    /// Resolves both states for every relation and diffs the answers.
    pub fn summarize_transition(
        &self,
        entity: EntityType,
        from: LifecycleState,
        to: LifecycleState,
    ) -> Result<TransitionSummary> {
        let mut relations = Vec::with_capacity(Relation::BY_PRIORITY.len());

        for relation in Relation::BY_PRIORITY.into_iter().rev() {
            let before = self.resolve(entity, from, relation)?;
            let after = self.resolve(entity, to, relation)?;

            relations.push(RelationDelta {
                relation,
                gained: after.capabilities.difference(before.capabilities),
                lost: before.capabilities.difference(after.capabilities),
                can_transition: before.can_reach(to),
            });
        }

        let reachable_by = relations
            .iter()
            .filter(|delta| delta.can_transition)
            .map(|delta| delta.relation)
            .collect();

        Ok(TransitionSummary {
            entity,
            from,
            to,
            relations,
            reachable_by,
        })
    }
}
