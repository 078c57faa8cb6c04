//! Entity categories with their own lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::types::{EntityType, LifecycleState};

/// A kind of record that carries a lifecycle status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityCategory {
    Project,
    User,
    Post,
    Event,
    Image,
    Task,
}

impl EntityCategory {
    pub const ALL: [EntityCategory; 6] = [
        EntityCategory::Project,
        EntityCategory::User,
        EntityCategory::Post,
        EntityCategory::Event,
        EntityCategory::Image,
        EntityCategory::Task,
    ];

    /// The rule entity type governing this category, if rules cover it.
    pub fn entity_type(self) -> Option<EntityType> {
        match self {
            EntityCategory::Project => Some(EntityType::Project),
            EntityCategory::User => Some(EntityType::User),
            EntityCategory::Post => Some(EntityType::Post),
            EntityCategory::Event => Some(EntityType::Event),
            EntityCategory::Image => Some(EntityType::Image),
            EntityCategory::Task => None,
        }
    }

    /// The name this category uses for a state.
    pub fn state_label(self, state: LifecycleState) -> &'static str {
        match (self, state) {
            (EntityCategory::Project | EntityCategory::User, s) => s.as_str(),
            (_, LifecycleState::Confirmed) => "review",
            (_, s) => s.as_str(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityCategory::Project => "project",
            EntityCategory::User => "user",
            EntityCategory::Post => "post",
            EntityCategory::Event => "event",
            EntityCategory::Image => "image",
            EntityCategory::Task => "task",
        }
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityCategory {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == name)
            .ok_or_else(|| ParseError::UnknownCategory(s.to_string()))
    }
}

impl TryFrom<EntityType> for EntityCategory {
    type Error = ParseError;

    fn try_from(entity: EntityType) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|category| category.entity_type() == Some(entity))
            .ok_or_else(|| ParseError::UnknownCategory(entity.to_string()))
    }
}
