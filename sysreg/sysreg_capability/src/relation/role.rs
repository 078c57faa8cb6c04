use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use sysreg_core::types::Relation;

bitflags! {
    /// Role bitmask stored on a membership record.
    ///
    /// Owners are not recorded here; ownership lives on the entity itself.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct RoleMask: u8 {
        const PARTNER = 2;
        const PARTICIPANT = 4;
        const MEMBER = 8;
        const CREATOR = 16;
    }
}

impl RoleMask {
    /// The mask recorded for a member holding `relation`.
    ///
    /// Creators are recorded with the member bit as well.
    pub fn for_relation(relation: Relation) -> Self {
        match relation {
            Relation::Anonymous | Relation::Owner => RoleMask::empty(),
            Relation::Partner => RoleMask::PARTNER,
            Relation::Participant => RoleMask::PARTICIPANT,
            Relation::Member => RoleMask::MEMBER,
            Relation::Creator => RoleMask::CREATOR | RoleMask::MEMBER,
        }
    }

    /// The highest-priority relation in the mask; anonymous if none.
    pub fn relation(self) -> Relation {
        [
            (RoleMask::CREATOR, Relation::Creator),
            (RoleMask::MEMBER, Relation::Member),
            (RoleMask::PARTICIPANT, Relation::Participant),
            (RoleMask::PARTNER, Relation::Partner),
        ]
        .into_iter()
        .find(|(bit, _)| self.contains(*bit))
        .map_or(Relation::Anonymous, |(_, relation)| relation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highest_bit_wins() {
        assert_eq!(
            (RoleMask::PARTNER | RoleMask::MEMBER).relation(),
            Relation::Member
        );
        assert_eq!(RoleMask::empty().relation(), Relation::Anonymous);
        assert_eq!(RoleMask::from_bits_truncate(1).relation(), Relation::Anonymous);
    }

    #[test]
    fn test_creator_carries_member_bit() {
        let mask = RoleMask::for_relation(Relation::Creator);
        assert_eq!(mask.bits(), 24);
        assert_eq!(mask.relation(), Relation::Creator);
    }
}
