mod answer;
mod resolver;
mod summary;

pub use answer::{CapabilityAnswer, Grants};
pub use resolver::{resolve_rules, CapabilityResolver};
pub use summary::{RelationDelta, TransitionSummary};
