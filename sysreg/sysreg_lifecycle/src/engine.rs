//! Transition validation.
//!
//! Checks a requested state change against the category's table, then
//! against the table's relation gate. The two failures are reported as
//! different errors so a caller can tell "that move does not exist" from
//! "you may not make that move".

use tracing::debug;

use sysreg_core::error::TransitionError;
use sysreg_core::types::{EntityCategory, LifecycleState, Relation, RelationGate};

use crate::model::TransitionTable;

/// Whether `from -> to` exists for `category`.
pub fn is_legal_transition(
    category: EntityCategory,
    from: LifecycleState,
    to: LifecycleState,
) -> bool {
    TransitionTable::for_category(category).is_legal(from, to)
}

/// Whether entering `to` is reserved to the owner.
pub fn requires_owner(category: EntityCategory, to: LifecycleState) -> bool {
    TransitionTable::for_category(category).is_owner_only(to)
}

/// The relation gate a caller must pass to enter `to`, if any.
pub fn required_gate(category: EntityCategory, to: LifecycleState) -> Option<RelationGate> {
    TransitionTable::for_category(category).gate(to)
}

/// Validates a requested transition for a caller with `relation`.
pub fn validate_transition(
    category: EntityCategory,
    from: LifecycleState,
    to: LifecycleState,
    relation: Relation,
) -> Result<(), TransitionError> {
    let table = TransitionTable::for_category(category);

    if !table.is_legal(from, to) {
        debug!(%category, %from, %to, "transition not in table");
        return Err(TransitionError::InvalidTransition { category, from, to });
    }

    if let Some(required) = table.gate(to) {
        if !required.admits(relation) {
            debug!(%category, %to, %relation, %required, "transition gate rejected caller");
            return Err(TransitionError::InsufficientRelation {
                category,
                to,
                relation,
                required,
            });
        }
    }

    Ok(())
}

/// Targets `relation` may move a `category` entity to from `from`.
pub fn allowed_targets(
    category: EntityCategory,
    from: LifecycleState,
    relation: Relation,
) -> Vec<LifecycleState> {
    let table = TransitionTable::for_category(category);
    table
        .successors(from)
        .iter()
        .copied()
        .filter(|to| table.gate(*to).map_or(true, |gate| gate.admits(relation)))
        .collect()
}
