//! # Sysreg Lifecycle
//!
//! Lifecycle state machine for entities governed by the sysreg engine.
//!
//! Each entity category has a fixed adjacency table of legal state changes.
//! Entering Archived or Trash is further reserved to the owner (for authored
//! content, the owner or the record's creator). This gate is hard-coded and
//! independent of the rules.
//!
//! ## Crate Structure
//!
//! - **model**: Per-category transition tables
//! - **engine**: `validate_transition` and friends
//! - **storage**: Status column encoding at the database boundary
//! - **integration**: `TransitionGate`, which also requires the rules to
//!   make the target reachable
//!
//! ```
//! use sysreg_core::types::{EntityCategory, LifecycleState, Relation};
//! use sysreg_lifecycle::validate_transition;
//!
//! assert!(validate_transition(
//!     EntityCategory::Project,
//!     LifecycleState::Released,
//!     LifecycleState::Trash,
//!     Relation::Owner,
//! )
//! .is_ok());
//! ```

pub mod engine;
pub mod integration;
pub mod model;
pub mod storage;

pub use engine::{
    allowed_targets, is_legal_transition, required_gate, requires_owner, validate_transition,
};
pub use integration::TransitionGate;
pub use model::TransitionTable;
