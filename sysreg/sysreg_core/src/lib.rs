//! # Sysreg Core
//!
//! `sysreg_core` holds the pieces every other sysreg crate builds on: the
//! packed rule bit layout, the domain enums, the error hierarchy, typed row
//! ids, and the configuration and logging utilities.
//!
//! ## Rules
//!
//! A rule is one `u32` packing six fields: project scope, entity type,
//! lifecycle state the rule applies from, a set of granted capabilities,
//! a target state for transition rules, and the set of caller relations the
//! rule applies to. Rules only ever grant; there are no deny rules.
//!
//! ```
//! use sysreg_core::codec::{Capabilities, RelationSet};
//! use sysreg_core::types::{EntityType, LifecycleState, Relation, Rule, RuleSpec};
//!
//! let value = RuleSpec::new(EntityType::Post)
//!     .from_state(LifecycleState::Draft)
//!     .grant(Capabilities::READ | Capabilities::UPDATE)
//!     .relations(RelationSet::MEMBER | RelationSet::CREATOR)
//!     .pack()
//!     .unwrap();
//!
//! let rule = Rule::new(value, "draft_update_member").decode();
//! assert!(rule.applies_to(EntityType::Post, LifecycleState::Draft, Relation::Owner));
//! ```
//!
//! ## Crate Structure
//!
//! - **codec**: Bit layout, `pack`/`unpack`, capability and relation flag sets
//! - **error**: Error types for all sysreg components
//! - **id**: Strongly-typed identifier types
//! - **types**: Entity types, states, relations, capabilities and rules
//! - **utils**: Configuration and log levels

pub mod codec;
pub mod error;
pub mod id;
pub mod types;
pub mod utils;

pub use codec::{Capabilities, Field, RelationSet, RuleFields};
pub use error::{Error, Result};
pub use id::{CallerId, EntityId, RuleId};
pub use types::{
    Capability, DecodedRule, EntityCategory, EntityType, LifecycleState, Relation,
    RelationGate, Rule, RuleLogic, RuleSpec,
};
pub use utils::{EngineConfig, LogLevel, RuleConfig};
