//! # Sysreg Capability
//!
//! Answers the question "what may this caller do with this entity right
//! now, and which states may they move it to?"
//!
//! ## Core Components
//!
//! - **Store**: Holds packed rules and hands the resolver the candidates for
//!   one entity type and state
//! - **Check**: Folds matching rules into a capability answer, and diffs
//!   answers across a transition
//! - **Relation**: Derives the caller's relation from ownership and
//!   membership records
//!
//! ## Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use sysreg_capability::check::CapabilityResolver;
//! use sysreg_capability::store::InMemoryRuleStore;
//! use sysreg_core::types::{EntityType, LifecycleState, Relation};
//!
//! let store = Arc::new(InMemoryRuleStore::with_defaults().unwrap());
//! let resolver = CapabilityResolver::new(store);
//!
//! let answer = resolver
//!     .resolve(EntityType::Post, LifecycleState::Draft, Relation::Member)
//!     .unwrap();
//!
//! assert!(answer.read());
//! assert!(answer.update());
//! assert!(!answer.manage());
//! ```

pub mod check;
pub mod model;
pub mod relation;
pub mod store;

pub use check::{CapabilityAnswer, CapabilityResolver, TransitionSummary};
pub use model::StoredRule;
pub use relation::{InMemoryMembershipSource, MembershipSource, RelationClassifier, RoleMask};
pub use store::{InMemoryRuleStore, RuleStore};
