//! Persisted rule model.

mod stored_rule;

pub use stored_rule::StoredRule;
