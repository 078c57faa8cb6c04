//! Caller relations.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::codec::RelationSet;
use crate::error::ParseError;

/// The caller's standing toward one entity instance.
///
/// Variants are declared in priority order, so `Ord` ranks them:
/// `Owner > Creator > Member > Participant > Partner > Anonymous`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    #[default]
    #[serde(alias = "anonym")]
    Anonymous,
    Partner,
    Participant,
    Member,
    #[serde(alias = "p_creator")]
    Creator,
    #[serde(alias = "p_owner")]
    Owner,
}

impl Relation {
    /// Highest priority first.
    pub const BY_PRIORITY: [Relation; 6] = [
        Relation::Owner,
        Relation::Creator,
        Relation::Member,
        Relation::Participant,
        Relation::Partner,
        Relation::Anonymous,
    ];

    /// The rule relation bit this caller is matched against.
    ///
    /// Rules have no owner bit: an owner is matched as creator.
    pub fn rule_bit(self) -> RelationSet {
        match self {
            Relation::Anonymous => RelationSet::ANONYMOUS,
            Relation::Partner => RelationSet::PARTNER,
            Relation::Participant => RelationSet::PARTICIPANT,
            Relation::Member => RelationSet::MEMBER,
            Relation::Creator | Relation::Owner => RelationSet::CREATOR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Relation::Anonymous => "anonymous",
            Relation::Partner => "partner",
            Relation::Participant => "participant",
            Relation::Member => "member",
            Relation::Creator => "creator",
            Relation::Owner => "owner",
        }
    }

    /// Parses a relation name from an untrusted boundary, falling back to
    /// the least-privileged relation for anything unrecognized.
    pub fn from_name_or_anonymous(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            warn!(relation = name, "unknown relation, treating caller as anonymous");
            Relation::Anonymous
        })
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anonymous" | "anonym" => Ok(Relation::Anonymous),
            "partner" => Ok(Relation::Partner),
            "participant" => Ok(Relation::Participant),
            "member" => Ok(Relation::Member),
            "creator" | "p_creator" => Ok(Relation::Creator),
            "owner" | "p_owner" => Ok(Relation::Owner),
            _ => Err(ParseError::UnknownRelation(s.to_string())),
        }
    }
}

impl From<Relation> for RelationSet {
    fn from(relation: Relation) -> Self {
        relation.rule_bit()
    }
}

impl RelationSet {
    /// Relations named by this set, lowest priority first.
    ///
    /// The creator bit is reported as `creator`; rules have no owner bit.
    pub fn relations(&self) -> Vec<Relation> {
        Relation::BY_PRIORITY
            .into_iter()
            .rev()
            .filter(|rel| *rel != Relation::Owner && self.contains(rel.rule_bit()))
            .collect()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.relations().into_iter().map(Relation::as_str).collect()
    }
}

impl FromIterator<Relation> for RelationSet {
    fn from_iter<I: IntoIterator<Item = Relation>>(iter: I) -> Self {
        iter.into_iter()
            .fold(RelationSet::empty(), |set, rel| set | rel.rule_bit())
    }
}

impl Serialize for RelationSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.relations().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RelationSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Vec::<Relation>::deserialize(deserializer)?
            .into_iter()
            .collect())
    }
}

/// A hard-coded relation requirement on a transition target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationGate {
    /// Only the recorded owner
    Owner,
    /// The recorded owner or a member holding the creator role
    OwnerOrCreator,
}

impl RelationGate {
    pub fn admits(self, relation: Relation) -> bool {
        match self {
            RelationGate::Owner => relation == Relation::Owner,
            RelationGate::OwnerOrCreator => {
                matches!(relation, Relation::Owner | Relation::Creator)
            }
        }
    }
}

impl fmt::Display for RelationGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationGate::Owner => f.write_str("owner"),
            RelationGate::OwnerOrCreator => f.write_str("owner or creator"),
        }
    }
}
