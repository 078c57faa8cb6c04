//! Status column encoding.
//!
//! Entity rows keep their lifecycle status in an integer column where each
//! state owns a group of bits; sub-statuses set other bits inside the same
//! group (a user's "confirmed" is 1024 rather than 512, a draft under
//! review is 256). Scope toggles live above the status groups and are
//! ignored here. These values never leave this module.

use sysreg_core::error::ParseError;
use sysreg_core::types::{EntityCategory, LifecycleState};

/// Bit groups per state: (state, first bit, width).
const GROUPS: [(LifecycleState, u32, u32); 7] = [
    (LifecycleState::New, 0, 3),
    (LifecycleState::Demo, 3, 3),
    (LifecycleState::Draft, 6, 3),
    (LifecycleState::Confirmed, 9, 3),
    (LifecycleState::Released, 12, 3),
    (LifecycleState::Archived, 15, 1),
    (LifecycleState::Trash, 16, 1),
];

/// Scope toggles (bits 17-21), not part of the status.
const SCOPE_BITS: u32 = 0b11111 << 17;

const CONFIRMED_USER: u32 = 2 << 9;

const fn group_mask(first: u32, width: u32) -> u32 {
    ((1 << width) - 1) << first
}

/// Maps a status column value onto its lifecycle state.
///
/// The status bits must fall inside exactly one state's group.
pub fn decode_status(column: u32) -> Result<LifecycleState, ParseError> {
    if column & !(SCOPE_BITS | group_mask(0, 17)) != 0 {
        return Err(ParseError::UnknownStatusColumn(column));
    }

    let status = column & !SCOPE_BITS;
    GROUPS
        .iter()
        .find(|(_, first, width)| {
            let mask = group_mask(*first, *width);
            status != 0 && status & mask == status
        })
        .map(|(state, _, _)| *state)
        .ok_or(ParseError::UnknownStatusColumn(column))
}

/// The canonical column value for `state` in `category`.
pub fn encode_status(category: EntityCategory, state: LifecycleState) -> u32 {
    if category == EntityCategory::User && state == LifecycleState::Confirmed {
        return CONFIRMED_USER;
    }
    GROUPS
        .iter()
        .find(|(s, _, _)| *s == state)
        .map_or(0, |(_, first, _)| 1 << first)
}
