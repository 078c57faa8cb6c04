//! Error types for the sysreg capability engine.
//!
//! Errors are organized by subsystem. The root error type, `Error`, wraps
//! each subsystem's error so callers can handle everything uniformly at the
//! top level while still matching on the precise failure underneath.

use std::path::PathBuf;

use thiserror::Error;

use crate::codec::Field;
use crate::id::RuleId;
use crate::types::{EntityCategory, EntityType, LifecycleState, Relation, RelationGate};

/// Root error type for the engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Rule packing errors
    #[error("Encoding error: {0}")]
    Codec(#[from] CodecError),

    /// Rejected lifecycle transitions
    #[error("Transition error: {0}")]
    Transition(#[from] TransitionError),

    /// Rule store and membership lookups
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Unknown names at the string boundary
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Configuration loading
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A `pack` call received a value that does not fit its field.
///
/// Always a programming or configuration error, never end-user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Value exceeds the field's bit width
    #[error("{field} value {value} exceeds maximum {max}")]
    FieldOverflow {
        /// The offending field
        field: Field,
        /// The rejected value
        value: u32,
        /// Largest value the field can hold
        max: u32,
    },

    /// Value sets bits owned by another field
    #[error("{field} value sets reserved bits {bits:#b}")]
    ReservedBits {
        /// The offending field
        field: Field,
        /// The reserved bits that were set
        bits: u32,
    },
}

/// A requested lifecycle transition was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// The (from, to) pair is not in the category's transition table
    #[error("invalid {category} transition: {from} -> {to}")]
    InvalidTransition {
        category: EntityCategory,
        from: LifecycleState,
        to: LifecycleState,
    },

    /// The move exists, but the caller's relation does not pass its gate
    #[error("{category} transition to {to} requires {required}, caller is {relation}")]
    InsufficientRelation {
        category: EntityCategory,
        to: LifecycleState,
        relation: Relation,
        required: RelationGate,
    },

    /// Structurally legal, but no matching rule makes the target reachable
    #[error("no rule lets {relation} move {entity} from {from} to {to}")]
    NotPermitted {
        entity: EntityType,
        from: LifecycleState,
        to: LifecycleState,
        relation: Relation,
    },
}

/// Rule store and membership source errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backing store could not answer; retryable
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// No rule with this id
    #[error("rule not found: {0}")]
    RuleNotFound(RuleId),

    /// Default rules may not be edited or removed
    #[error("rule '{0}' is a default rule and cannot be modified")]
    ImmutableRule(String),

    /// Conflicting administrative edit
    #[error("rule conflict: {0}")]
    Conflict(String),
}

/// A name or stored value could not be mapped onto a domain type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown entity type '{0}'")]
    UnknownEntity(String),

    #[error("unknown lifecycle state '{0}'")]
    UnknownState(String),

    #[error("unknown relation '{0}'")]
    UnknownRelation(String),

    #[error("unknown capability '{0}'")]
    UnknownCapability(String),

    #[error("unknown entity category '{0}'")]
    UnknownCategory(String),

    #[error("unknown status column value {0}")]
    UnknownStatusColumn(u32),

    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),
}

/// Errors raised while loading engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file does not exist
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Config file is not valid TOML for the expected shape
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// A configured rule is incomplete or contradictory
    #[error("invalid rule '{name}': {reason}")]
    InvalidRule { name: String, reason: String },
}

/// Result type used throughout the engine.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let codec_err = CodecError::FieldOverflow {
            field: Field::Entity,
            value: 40,
            max: 31,
        };
        let error: Error = codec_err.into();
        assert!(matches!(error, Error::Codec(_)));

        let store_err = StoreError::Unavailable("connection refused".to_string());
        let error: Error = store_err.into();
        assert!(matches!(error, Error::Store(StoreError::Unavailable(_))));
    }

    #[test]
    fn test_transition_errors_render_differently() {
        let invalid = TransitionError::InvalidTransition {
            category: EntityCategory::Project,
            from: LifecycleState::New,
            to: LifecycleState::Trash,
        };
        let gated = TransitionError::InsufficientRelation {
            category: EntityCategory::Project,
            to: LifecycleState::Trash,
            relation: Relation::Member,
            required: RelationGate::Owner,
        };

        assert_eq!(invalid.to_string(), "invalid project transition: new -> trash");
        assert_eq!(
            gated.to_string(),
            "project transition to trash requires owner, caller is member"
        );
    }

    #[test]
    fn test_error_display() {
        let error: Error = CodecError::FieldOverflow {
            field: Field::Scope,
            value: 9,
            max: 7,
        }
        .into();
        assert_eq!(
            error.to_string(),
            "Encoding error: scope value 9 exceeds maximum 7"
        );
    }
}
