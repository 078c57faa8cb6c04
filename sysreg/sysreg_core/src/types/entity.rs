//! Governed entity types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// The resource category a rule governs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Project,
    User,
    Page,
    Post,
    Event,
    Image,
    Location,
}

impl EntityType {
    pub const ALL: [EntityType; 7] = [
        EntityType::Project,
        EntityType::User,
        EntityType::Page,
        EntityType::Post,
        EntityType::Event,
        EntityType::Image,
        EntityType::Location,
    ];

    /// Value of the rule's entity field. Code 0 is reserved for "all".
    pub fn code(self) -> u32 {
        match self {
            EntityType::Project => 1,
            EntityType::User => 2,
            EntityType::Page => 3,
            EntityType::Post => 4,
            EntityType::Event => 5,
            EntityType::Image => 6,
            EntityType::Location => 7,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|entity| entity.code() == code)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::Project => "project",
            EntityType::User => "user",
            EntityType::Page => "page",
            EntityType::Post => "post",
            EntityType::Event => "event",
            EntityType::Image => "image",
            EntityType::Location => "location",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|entity| entity.as_str() == name)
            .ok_or_else(|| ParseError::UnknownEntity(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for entity in EntityType::ALL {
            assert_eq!(EntityType::from_code(entity.code()), Some(entity));
        }
        assert_eq!(EntityType::from_code(0), None);
        assert_eq!(EntityType::from_code(8), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Post".parse::<EntityType>().unwrap(), EntityType::Post);
        assert!(matches!(
            "widget".parse::<EntityType>(),
            Err(ParseError::UnknownEntity(_))
        ));
    }
}
