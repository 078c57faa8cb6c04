//! Domain types.
//!
//! Entity types, lifecycle states, relations and capabilities as proper
//! enums. Their numeric codes are only meaningful to the codec and to the
//! storage boundary.

pub mod capability;
pub mod category;
pub mod entity;
pub mod relation;
pub mod rule;
pub mod state;

pub use capability::Capability;
pub use category::EntityCategory;
pub use entity::EntityType;
pub use relation::{Relation, RelationGate};
pub use rule::{DecodedRule, Rule, RuleLogic, RuleSpec};
pub use state::LifecycleState;
