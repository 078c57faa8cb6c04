//! Named capabilities.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::codec::Capabilities;
use crate::error::ParseError;

/// A single named operation a rule can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Read,
    ReadPreview,
    ReadMetadata,
    Update,
    UpdateComment,
    UpdateAppend,
    Manage,
    ManageStatus,
    ManageDelete,
    List,
    Share,
}

impl Capability {
    pub const ALL: [Capability; 11] = [
        Capability::Read,
        Capability::ReadPreview,
        Capability::ReadMetadata,
        Capability::Update,
        Capability::UpdateComment,
        Capability::UpdateAppend,
        Capability::Manage,
        Capability::ManageStatus,
        Capability::ManageDelete,
        Capability::List,
        Capability::Share,
    ];

    pub fn flag(self) -> Capabilities {
        match self {
            Capability::Read => Capabilities::READ,
            Capability::ReadPreview => Capabilities::READ_PREVIEW,
            Capability::ReadMetadata => Capabilities::READ_METADATA,
            Capability::Update => Capabilities::UPDATE,
            Capability::UpdateComment => Capabilities::UPDATE_COMMENT,
            Capability::UpdateAppend => Capabilities::UPDATE_APPEND,
            Capability::Manage => Capabilities::MANAGE,
            Capability::ManageStatus => Capabilities::MANAGE_STATUS,
            Capability::ManageDelete => Capabilities::MANAGE_DELETE,
            Capability::List => Capabilities::LIST,
            Capability::Share => Capabilities::SHARE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Capability::Read => "read",
            Capability::ReadPreview => "read_preview",
            Capability::ReadMetadata => "read_metadata",
            Capability::Update => "update",
            Capability::UpdateComment => "update_comment",
            Capability::UpdateAppend => "update_append",
            Capability::Manage => "manage",
            Capability::ManageStatus => "manage_status",
            Capability::ManageDelete => "manage_delete",
            Capability::List => "list",
            Capability::Share => "share",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase().replace('-', "_");
        match name.as_str() {
            "status" => Ok(Capability::ManageStatus),
            "delete" => Ok(Capability::ManageDelete),
            _ => Self::ALL
                .into_iter()
                .find(|cap| cap.as_str() == name)
                .ok_or_else(|| ParseError::UnknownCapability(s.to_string())),
        }
    }
}

impl FromIterator<Capability> for Capabilities {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Capabilities::empty(), |caps, cap| caps | cap.flag())
    }
}

impl Capabilities {
    /// The named capabilities contained in this set, in declaration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.capabilities().into_iter().map(Capability::as_str).collect()
    }

    pub fn capabilities(&self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|cap| self.contains(cap.flag()))
            .collect()
    }
}

// Capability sets serialize as a list of names.
impl Serialize for Capabilities {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.capabilities().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Capabilities {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Vec::<Capability>::deserialize(deserializer)?
            .into_iter()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("status".parse::<Capability>().unwrap(), Capability::ManageStatus);
        assert_eq!(
            "manage-delete".parse::<Capability>().unwrap(),
            Capability::ManageDelete
        );
        assert!("fly".parse::<Capability>().is_err());
    }

    #[test]
    fn test_collect_and_name() {
        let caps: Capabilities = [Capability::Read, Capability::Share].into_iter().collect();
        assert_eq!(caps, Capabilities::READ | Capabilities::SHARE);
        assert_eq!(caps.names(), vec!["read", "share"]);
    }

    #[test]
    fn test_capabilities_serde() {
        let caps = Capabilities::MANAGE_STATUS | Capabilities::LIST;
        let json = serde_json::to_string(&caps).unwrap();
        assert_eq!(json, r#"["manage_status","list"]"#);
        let back: Capabilities = serde_json::from_str(&json).unwrap();
        assert_eq!(back, caps);
    }
}
