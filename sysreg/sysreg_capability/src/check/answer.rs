use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use sysreg_core::codec::Capabilities;
use sysreg_core::types::{DecodedRule, LifecycleState};

/// What a caller may do with an entity in its current state.
///
/// Built by OR-ing every matching rule into an empty answer, so the default
/// value is the fail-closed answer: nothing granted, nothing reachable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityAnswer {
    /// Union of the capability bits of all matching rules
    pub capabilities: Capabilities,

    /// Target states made reachable by matching transition rules
    pub reachable_states: BTreeSet<LifecycleState>,

    /// Names of the rules that contributed, in the order they were seen
    pub matched_rules: Vec<String>,
}

/// The named grants of an answer as plain booleans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grants {
    pub read: bool,
    pub update: bool,
    pub manage: bool,
    pub list: bool,
    pub share: bool,
    pub manage_status: bool,
    pub manage_delete: bool,
}

impl CapabilityAnswer {
    /// Folds one matching rule into the answer.
    ///
    /// Only ever adds: no rule can take away what another granted.
    pub fn absorb(&mut self, rule: &DecodedRule, name: &str) {
        self.capabilities |= rule.capabilities;
        if let Some(to) = rule.to_state.filter(|_| rule.grants_transition()) {
            self.reachable_states.insert(to);
        }
        self.matched_rules.push(name.to_string());
    }

    pub fn read(&self) -> bool {
        self.capabilities.contains(Capabilities::READ)
    }

    pub fn update(&self) -> bool {
        self.capabilities.contains(Capabilities::UPDATE)
    }

    /// The coarse manage bit only. See [`can_manage_any`](Self::can_manage_any).
    pub fn manage(&self) -> bool {
        self.capabilities.contains(Capabilities::MANAGE)
    }

    pub fn manage_status(&self) -> bool {
        self.capabilities.contains(Capabilities::MANAGE_STATUS)
    }

    pub fn manage_delete(&self) -> bool {
        self.capabilities.contains(Capabilities::MANAGE_DELETE)
    }

    /// True if any of manage, manage-status or manage-delete is granted.
    pub fn can_manage_any(&self) -> bool {
        self.capabilities.intersects(Capabilities::MANAGE_ANY)
    }

    pub fn list(&self) -> bool {
        self.capabilities.contains(Capabilities::LIST)
    }

    pub fn share(&self) -> bool {
        self.capabilities.contains(Capabilities::SHARE)
    }

    pub fn can_reach(&self, state: LifecycleState) -> bool {
        self.reachable_states.contains(&state)
    }

    /// Fail-closed: nothing granted and nothing reachable.
    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty() && self.reachable_states.is_empty()
    }

    pub fn grants(&self) -> Grants {
        Grants {
            read: self.read(),
            update: self.update(),
            manage: self.manage(),
            list: self.list(),
            share: self.share(),
            manage_status: self.manage_status(),
            manage_delete: self.manage_delete(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sysreg_core::codec::RelationSet;
    use sysreg_core::types::{EntityType, RuleSpec};

    fn decoded(spec: RuleSpec) -> DecodedRule {
        DecodedRule::from_value(spec.pack().unwrap())
    }

    #[test]
    fn test_default_is_fail_closed() {
        let answer = CapabilityAnswer::default();
        assert!(answer.is_empty());
        assert_eq!(answer.grants(), Grants::default());
    }

    #[test]
    fn test_absorb_only_adds() {
        let mut answer = CapabilityAnswer::default();
        answer.absorb(
            &decoded(
                RuleSpec::new(EntityType::Post)
                    .grant(Capabilities::READ | Capabilities::UPDATE)
                    .relations(RelationSet::MEMBER),
            ),
            "edit",
        );
        answer.absorb(
            &decoded(
                RuleSpec::new(EntityType::Post)
                    .grant(Capabilities::READ)
                    .relations(RelationSet::ALL),
            ),
            "read",
        );

        assert!(answer.read());
        assert!(answer.update());
        assert_eq!(answer.matched_rules, vec!["edit", "read"]);
    }

    #[test]
    fn test_transition_needs_manage_type_bit() {
        let mut answer = CapabilityAnswer::default();
        answer.absorb(
            &decoded(
                RuleSpec::new(EntityType::Post)
                    .to_state(LifecycleState::Released)
                    .grant(Capabilities::READ)
                    .relations(RelationSet::ALL),
            ),
            "read_only_transition",
        );
        assert!(answer.reachable_states.is_empty());

        answer.absorb(
            &decoded(
                RuleSpec::new(EntityType::Post)
                    .to_state(LifecycleState::Trash)
                    .grant(Capabilities::MANAGE_DELETE)
                    .relations(RelationSet::CREATOR),
            ),
            "trash",
        );
        assert!(answer.can_reach(LifecycleState::Trash));
        assert!(answer.can_manage_any());
        assert!(!answer.manage());
        assert!(answer.manage_delete());
    }

    #[test]
    fn test_answer_serializes_capability_names() {
        let mut answer = CapabilityAnswer::default();
        answer.absorb(
            &decoded(
                RuleSpec::new(EntityType::Post)
                    .to_state(LifecycleState::Draft)
                    .grant(Capabilities::MANAGE_STATUS)
                    .relations(RelationSet::CREATOR),
            ),
            "restore",
        );

        let json = serde_json::to_value(&answer).unwrap();
        assert_eq!(json["capabilities"], serde_json::json!(["manage_status"]));
        assert_eq!(json["reachable_states"], serde_json::json!(["draft"]));
    }
}
