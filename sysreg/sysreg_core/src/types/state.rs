//! Lifecycle states.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// An entity's position in its status progression.
///
/// Ordered from `New` to `Trash`. `Confirmed` is the state content
/// categories call "review".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    New,
    Demo,
    Draft,
    #[serde(alias = "review")]
    Confirmed,
    Released,
    Archived,
    Trash,
}

impl LifecycleState {
    pub const ALL: [LifecycleState; 7] = [
        LifecycleState::New,
        LifecycleState::Demo,
        LifecycleState::Draft,
        LifecycleState::Confirmed,
        LifecycleState::Released,
        LifecycleState::Archived,
        LifecycleState::Trash,
    ];

    /// Value of the rule's from/to state fields. Code 0 means "any" in
    /// `from_state` and "no transition" in `to_state`.
    pub fn code(self) -> u32 {
        match self {
            LifecycleState::New => 1,
            LifecycleState::Demo => 2,
            LifecycleState::Draft => 3,
            LifecycleState::Confirmed => 4,
            LifecycleState::Released => 5,
            LifecycleState::Archived => 6,
            LifecycleState::Trash => 7,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.code() == code)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleState::New => "new",
            LifecycleState::Demo => "demo",
            LifecycleState::Draft => "draft",
            LifecycleState::Confirmed => "confirmed",
            LifecycleState::Released => "released",
            LifecycleState::Archived => "archived",
            LifecycleState::Trash => "trash",
        }
    }

    /// Whether the entity is still in active use (not archived or trashed).
    pub fn is_active(self) -> bool {
        self < LifecycleState::Archived
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleState {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "review" => Ok(LifecycleState::Confirmed),
            name => Self::ALL
                .into_iter()
                .find(|state| state.as_str() == name)
                .ok_or_else(|| ParseError::UnknownState(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_alias() {
        assert_eq!(
            "review".parse::<LifecycleState>().unwrap(),
            LifecycleState::Confirmed
        );
        let state: LifecycleState = serde_json::from_str("\"review\"").unwrap();
        assert_eq!(state, LifecycleState::Confirmed);
    }

    #[test]
    fn test_codes_are_non_zero() {
        for state in LifecycleState::ALL {
            assert_ne!(state.code(), 0);
            assert_eq!(LifecycleState::from_code(state.code()), Some(state));
        }
        assert_eq!(LifecycleState::from_code(0), None);
    }

    #[test]
    fn test_is_active() {
        assert!(LifecycleState::Released.is_active());
        assert!(!LifecycleState::Archived.is_active());
        assert!(!LifecycleState::Trash.is_active());
    }
}
