//! Packed rules and their decoded form.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::codec::{self, Capabilities, RelationSet, RuleFields};
use crate::error::CodecError;
use crate::types::{EntityType, LifecycleState, Relation};

/// Whether a transition rule is the expected next step or an alternative action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLogic {
    #[default]
    Primary,
    Alternative,
}

/// A packed rule integer and its display name, as handed back by a rule store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    pub value: u32,
    pub name: String,
}

impl Rule {
    pub fn new(value: u32, name: impl Into<String>) -> Self {
        Self {
            value,
            name: name.into(),
        }
    }

    pub fn fields(&self) -> RuleFields {
        codec::unpack(self.value)
    }

    pub fn decode(&self) -> DecodedRule {
        DecodedRule::from_value(self.value)
    }

    /// One-line description, e.g. `entity=post | from=draft | caps=[read] | rels=[member]`.
    pub fn describe(&self) -> String {
        self.decode().to_string()
    }
}

/// A rule with every field mapped onto domain types.
///
/// Wildcards and unknown codes decode to `None`: a `from_state` of 0 means
/// "any state", a `to_state` of 0 means "not a transition".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecodedRule {
    pub scope: u32,
    pub entity: Option<EntityType>,
    pub from_state: Option<LifecycleState>,
    pub capabilities: Capabilities,
    pub to_state: Option<LifecycleState>,
    pub relations: RelationSet,
}

impl DecodedRule {
    pub fn from_value(value: u32) -> Self {
        let fields = codec::unpack(value);
        Self {
            scope: fields.scope,
            entity: EntityType::from_code(fields.entity),
            from_state: LifecycleState::from_code(fields.from_state),
            capabilities: Capabilities::from_window(fields.capabilities),
            to_state: LifecycleState::from_code(fields.to_state),
            relations: RelationSet::from_field(fields.relations),
        }
    }

    pub fn is_transition(&self) -> bool {
        self.to_state.is_some()
    }

    /// Whether this rule applies to a request for `entity` in `state` by `relation`.
    pub fn applies_to(
        &self,
        entity: EntityType,
        state: LifecycleState,
        relation: Relation,
    ) -> bool {
        self.entity == Some(entity)
            && self.from_state.map_or(true, |from| from == state)
            && self.relations.intersects(relation.rule_bit())
    }

    /// Whether this rule makes its `to_state` reachable.
    pub fn grants_transition(&self) -> bool {
        self.is_transition() && self.capabilities.intersects(Capabilities::MANAGE_ANY)
    }
}

impl fmt::Display for DecodedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.entity {
            Some(entity) => write!(f, "entity={}", entity)?,
            None => write!(f, "entity=?")?,
        }
        if self.scope != 0 {
            write!(f, " | scope={}", self.scope)?;
        }
        match self.from_state {
            Some(state) => write!(f, " | from={}", state)?,
            None => write!(f, " | from=any")?,
        }
        if let Some(to) = self.to_state {
            write!(f, " | to={}", to)?;
        }
        write!(f, " | caps=[{}]", self.capabilities.names().join(","))?;
        write!(f, " | rels=[{}]", self.relations.names().join(","))
    }
}

/// Builder for rules in symbolic form.
///
/// ```
/// use sysreg_core::codec::{Capabilities, RelationSet};
/// use sysreg_core::types::{EntityType, LifecycleState, RuleSpec};
///
/// let value = RuleSpec::new(EntityType::Post)
///     .from_state(LifecycleState::Released)
///     .grant(Capabilities::READ | Capabilities::LIST)
///     .relations(RelationSet::ALL)
///     .pack()
///     .unwrap();
/// assert_eq!(value, 1_048_579_360);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSpec {
    scope: u32,
    entity: EntityType,
    from: Option<LifecycleState>,
    capabilities: Capabilities,
    to: Option<LifecycleState>,
    relations: RelationSet,
}

impl RuleSpec {
    pub fn new(entity: EntityType) -> Self {
        Self {
            scope: 0,
            entity,
            from: None,
            capabilities: Capabilities::empty(),
            to: None,
            relations: RelationSet::empty(),
        }
    }

    pub fn scope(mut self, scope: u32) -> Self {
        self.scope = scope;
        self
    }

    pub fn from_state(mut self, state: LifecycleState) -> Self {
        self.from = Some(state);
        self
    }

    pub fn to_state(mut self, state: LifecycleState) -> Self {
        self.to = Some(state);
        self
    }

    pub fn grant(mut self, capabilities: Capabilities) -> Self {
        self.capabilities |= capabilities;
        self
    }

    pub fn relations(mut self, relations: RelationSet) -> Self {
        self.relations |= relations;
        self
    }

    pub fn pack(&self) -> Result<u32, CodecError> {
        codec::pack(
            self.scope,
            self.entity.code(),
            self.from.map_or(0, LifecycleState::code),
            self.capabilities.window(),
            self.to.map_or(0, LifecycleState::code),
            self.relations.field(),
        )
    }
}
