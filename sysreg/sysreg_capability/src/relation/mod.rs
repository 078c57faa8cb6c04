//! Caller relation classification.
//!
//! A caller's relation to an entity comes from two places: the entity's
//! owner column, and a membership record carrying a role bitmask. Owner
//! wins over any membership; a caller with neither is anonymous.

mod classifier;
mod role;
mod source;

pub use classifier::RelationClassifier;
pub use role::RoleMask;
pub use source::{InMemoryMembershipSource, MembershipSource};
