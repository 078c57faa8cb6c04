//! Rule bit layout.
//!
//! A rule is a single `u32` carrying six packed fields:
//!
//! ```text
//!  bit   31..30   29..25     24..20        19..17     16..11        10..8       7..3     2..0
//!        unused   relation   capability²   to_state   capability¹   from_state  entity   scope
//! ```
//!
//! The capability window spans bits 11-24. Bits 17-19 inside that window
//! belong to `to_state`, so capability values are expressed window-relative
//! and must leave that hole clear.
//!
//! This module is the only place the offsets and widths are spelled out.
//! Everything else addresses the layout through [`Field`], [`mask_for`],
//! [`extract`] and the flag sets defined here.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CodecError;

/// A named field of a packed rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Project-category qualifier, 0 = all scopes.
    Scope,
    /// Governed entity type.
    Entity,
    /// Lifecycle state the rule applies from, 0 = any state.
    FromState,
    /// Window-relative capability bits.
    Capability,
    /// Target state of a transition rule, 0 = not a transition.
    ToState,
    /// Relations the rule applies to.
    Relation,
}

impl Field {
    /// All fields in bit order.
    pub const ALL: [Field; 6] = [
        Field::Scope,
        Field::Entity,
        Field::FromState,
        Field::Capability,
        Field::ToState,
        Field::Relation,
    ];

    /// Bit offset of the field's lowest bit.
    pub const fn offset(self) -> u32 {
        match self {
            Field::Scope => 0,
            Field::Entity => 3,
            Field::FromState => 8,
            Field::Capability => 11,
            Field::ToState => 17,
            Field::Relation => 25,
        }
    }

    /// Number of bits the field spans.
    pub const fn width(self) -> u32 {
        match self {
            Field::Scope => 3,
            Field::Entity => 5,
            Field::FromState => 3,
            Field::Capability => 14,
            Field::ToState => 3,
            Field::Relation => 5,
        }
    }

    /// Largest raw value the field can hold.
    pub const fn max_value(self) -> u32 {
        (1 << self.width()) - 1
    }

    /// The full bit range of the field, including any hole.
    const fn window(self) -> u32 {
        self.max_value() << self.offset()
    }

    pub fn name(self) -> &'static str {
        match self {
            Field::Scope => "scope",
            Field::Entity => "entity",
            Field::FromState => "from_state",
            Field::Capability => "capability",
            Field::ToState => "to_state",
            Field::Relation => "relation",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Window-relative capability bits that overlap `to_state`.
pub const CAPABILITY_HOLE: u32 = Field::ToState.window() >> Field::Capability.offset();

/// Returns the mask covering the bits owned by `field`.
///
/// For [`Field::Capability`] the `to_state` hole is excluded, so the masks of
/// all six fields are pairwise disjoint.
pub const fn mask_for(field: Field) -> u32 {
    match field {
        Field::Capability => Field::Capability.window() & !Field::ToState.window(),
        other => other.window(),
    }
}

/// Reads the raw value of `field` out of a packed rule.
pub const fn extract(value: u32, field: Field) -> u32 {
    (value & mask_for(field)) >> field.offset()
}

/// Shifts a raw field value into position, rejecting values that do not fit.
pub fn place(field: Field, raw: u32) -> Result<u32, CodecError> {
    if raw > field.max_value() {
        return Err(CodecError::FieldOverflow {
            field,
            value: raw,
            max: field.max_value(),
        });
    }

    if field == Field::Capability && raw & CAPABILITY_HOLE != 0 {
        return Err(CodecError::ReservedBits {
            field,
            bits: raw & CAPABILITY_HOLE,
        });
    }

    Ok(raw << field.offset())
}

/// Packs the six raw field values into a rule integer.
pub fn pack(
    scope: u32,
    entity: u32,
    from_state: u32,
    capability_bits: u32,
    to_state: u32,
    relation_bits: u32,
) -> Result<u32, CodecError> {
    let mut value = 0;
    for (field, raw) in [
        (Field::Scope, scope),
        (Field::Entity, entity),
        (Field::FromState, from_state),
        (Field::Capability, capability_bits),
        (Field::ToState, to_state),
        (Field::Relation, relation_bits),
    ] {
        value |= place(field, raw)?;
    }
    Ok(value)
}

/// Splits a rule integer into its six raw field values. Bits 30-31 are ignored.
pub fn unpack(value: u32) -> RuleFields {
    RuleFields {
        scope: extract(value, Field::Scope),
        entity: extract(value, Field::Entity),
        from_state: extract(value, Field::FromState),
        capabilities: extract(value, Field::Capability),
        to_state: extract(value, Field::ToState),
        relations: extract(value, Field::Relation),
    }
}

/// The raw, unvalidated 6-tuple carried by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RuleFields {
    pub scope: u32,
    pub entity: u32,
    pub from_state: u32,
    pub capabilities: u32,
    pub to_state: u32,
    pub relations: u32,
}

impl RuleFields {
    /// Returns the raw value of one field.
    pub fn get(&self, field: Field) -> u32 {
        match field {
            Field::Scope => self.scope,
            Field::Entity => self.entity,
            Field::FromState => self.from_state,
            Field::Capability => self.capabilities,
            Field::ToState => self.to_state,
            Field::Relation => self.relations,
        }
    }

    pub fn pack(&self) -> Result<u32, CodecError> {
        pack(
            self.scope,
            self.entity,
            self.from_state,
            self.capabilities,
            self.to_state,
            self.relations,
        )
    }
}

bitflags! {
    /// Capability bits, window-relative (bit 0 is rule bit 11).
    ///
    /// Bits 6-8 are the `to_state` hole and have no flag.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
    pub struct Capabilities: u16 {
        const READ = 1 << 0;
        const READ_PREVIEW = 1 << 1;
        const READ_METADATA = 1 << 2;
        const UPDATE = 1 << 3;
        const UPDATE_COMMENT = 1 << 4;
        const UPDATE_APPEND = 1 << 5;
        const MANAGE = 1 << 9;
        const MANAGE_STATUS = 1 << 10;
        const MANAGE_DELETE = 1 << 11;
        const LIST = 1 << 12;
        const SHARE = 1 << 13;
    }
}

impl Capabilities {
    /// Every bit that counts as a manage-type capability.
    pub const MANAGE_ANY: Capabilities = Capabilities::MANAGE
        .union(Capabilities::MANAGE_STATUS)
        .union(Capabilities::MANAGE_DELETE);

    /// Builds a set from a raw capability field value, dropping unknown bits.
    pub fn from_window(raw: u32) -> Self {
        Self::from_bits_truncate((raw & Field::Capability.max_value()) as u16)
    }

    /// The raw capability field value for this set.
    pub fn window(self) -> u32 {
        u32::from(self.bits())
    }
}

bitflags! {
    /// Relation bits, field-relative (bit 0 is rule bit 25).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
    pub struct RelationSet: u8 {
        const ANONYMOUS = 1 << 0;
        const PARTNER = 1 << 1;
        const PARTICIPANT = 1 << 2;
        const MEMBER = 1 << 3;
        const CREATOR = 1 << 4;

        const AUTHENTICATED = Self::PARTNER.bits()
            | Self::PARTICIPANT.bits()
            | Self::MEMBER.bits()
            | Self::CREATOR.bits();
        const ACTIVE = Self::PARTICIPANT.bits() | Self::MEMBER.bits() | Self::CREATOR.bits();
        const ALL = Self::ANONYMOUS.bits() | Self::AUTHENTICATED.bits();
    }
}

impl RelationSet {
    pub fn from_field(raw: u32) -> Self {
        Self::from_bits_truncate((raw & Field::Relation.max_value()) as u8)
    }

    pub fn field(self) -> u32 {
        u32::from(self.bits())
    }
}
