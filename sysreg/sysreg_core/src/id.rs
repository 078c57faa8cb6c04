//! Strongly-typed identifiers.
//!
//! Rows in the backing store are keyed by integers. Each identifier type is
//! a thin wrapper around a `u64` with a phantom marker, so a caller id can
//! never be passed where an entity id is expected even though both are
//! plain row numbers underneath.
//!
//! # Examples
//!
//! ```
//! use sysreg_core::id::{CallerId, EntityId};
//! use std::str::FromStr;
//!
//! let caller = CallerId::new(7);
//! let entity = EntityId::from_str("42").unwrap();
//!
//! assert_eq!(caller.get(), 7);
//! assert_eq!(entity.to_string(), "42");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::num::ParseIntError;
use std::str::FromStr;

/// A type-safe row identifier.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T> {
    value: u64,
    #[serde(skip)]
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Wrap a raw row id.
    pub const fn new(value: u64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// The raw row id.
    pub const fn get(&self) -> u64 {
        self.value
    }
}

// Manual impls so the marker type needs no bounds.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> FromStr for Id<T> {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.trim().parse()?))
    }
}

impl<T> From<u64> for Id<T> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

/// Marker type for stored rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleMarker;
/// Identifier for a stored rule.
pub type RuleId = Id<RuleMarker>;

/// Marker type for callers (user accounts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallerMarker;
/// Identifier for a caller.
pub type CallerId = Id<CallerMarker>;

/// Marker type for governed entity instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityMarker;
/// Identifier for an entity instance (a project, post, image, ...).
pub type EntityId = Id<EntityMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(RuleId::new(12).to_string(), "12");
    }

    #[test]
    fn test_id_from_str() {
        let id = CallerId::from_str(" 99 ").unwrap();
        assert_eq!(id.get(), 99);
        assert!(CallerId::from_str("abc").is_err());
    }

    #[test]
    fn test_type_safety() {
        let caller = CallerId::new(5);
        let entity = EntityId::new(5);

        // Same raw value, different types:
        // assert_eq!(caller, entity) would not compile.
        assert_eq!(caller.get(), entity.get());
    }

    #[test]
    fn test_id_serde() {
        let id = EntityId::new(314);
        let serialized = serde_json::to_string(&id).unwrap();
        assert_eq!(serialized, "314");
        let deserialized: EntityId = serde_json::from_str(&serialized).unwrap();
        assert_eq!(id, deserialized);
    }
}
