//! Integration tests for capability resolution.

use std::sync::Arc;

use proptest::prelude::*;

use sysreg_capability::check::{resolve_rules, CapabilityResolver};
use sysreg_capability::model::StoredRule;
use sysreg_capability::relation::RoleMask;
use sysreg_capability::store::{InMemoryRuleStore, RuleStore};
use sysreg_core::codec::{self, Capabilities, Field, RelationSet, CAPABILITY_HOLE};
use sysreg_core::types::{EntityType, LifecycleState, Relation, Rule, RuleSpec};

fn store_with(rules: &[(RuleSpec, &str)]) -> Arc<InMemoryRuleStore> {
    let store = InMemoryRuleStore::new();
    for (spec, name) in rules {
        store
            .add_rule(StoredRule::new(spec.pack().unwrap(), *name))
            .unwrap();
    }
    Arc::new(store)
}

#[test]
fn member_reads_and_updates_draft_post() {
    let store = store_with(&[(
        RuleSpec::new(EntityType::Post)
            .from_state(LifecycleState::Draft)
            .grant(Capabilities::READ | Capabilities::UPDATE)
            .relations(RelationSet::MEMBER | Relation::Owner.rule_bit()),
        "draft_update_member",
    )]);
    let resolver = CapabilityResolver::new(store);

    let answer = resolver
        .resolve(EntityType::Post, LifecycleState::Draft, Relation::Member)
        .unwrap();
    let grants = answer.grants();

    assert!(grants.read);
    assert!(grants.update);
    assert!(!grants.manage);
    assert!(!grants.list);
    assert!(!grants.share);
    assert!(answer.reachable_states.is_empty());
}

#[test]
fn owner_reaches_confirmed_and_anonymous_read_adds_no_manage() {
    let store = store_with(&[
        (
            RuleSpec::new(EntityType::Project)
                .from_state(LifecycleState::Draft)
                .to_state(LifecycleState::Confirmed)
                .grant(Capabilities::MANAGE_STATUS)
                .relations(RelationSet::CREATOR),
            "project_draft_confirm_owner",
        ),
        (
            RuleSpec::new(EntityType::Project)
                .grant(Capabilities::READ)
                .relations(RelationSet::ANONYMOUS),
            "project_read_anonymous",
        ),
    ]);
    let resolver = CapabilityResolver::new(store);

    let owner = resolver
        .resolve(EntityType::Project, LifecycleState::Draft, Relation::Owner)
        .unwrap();
    assert!(owner.can_reach(LifecycleState::Confirmed));
    assert_eq!(owner.matched_rules, vec!["project_draft_confirm_owner"]);

    let anonymous = resolver
        .resolve(EntityType::Project, LifecycleState::Draft, Relation::Anonymous)
        .unwrap();
    assert!(anonymous.read());
    assert!(!anonymous.can_manage_any());
    assert!(anonymous.reachable_states.is_empty());
}

#[test]
fn default_rules_for_post_workflow() {
    let resolver = CapabilityResolver::new(Arc::new(InMemoryRuleStore::with_defaults().unwrap()));
    let resolve = |state, relation| {
        resolver
            .resolve(EntityType::Post, state, relation)
            .unwrap()
    };

    let creator_new = resolve(LifecycleState::New, Relation::Creator);
    assert!(creator_new.manage());
    assert!(creator_new.can_reach(LifecycleState::Draft));
    assert!(creator_new.can_reach(LifecycleState::Trash));

    // Owners match rules as creators.
    assert_eq!(
        resolve(LifecycleState::Draft, Relation::Owner),
        resolve(LifecycleState::Draft, Relation::Creator)
    );

    let member_review = resolve(LifecycleState::Confirmed, Relation::Member);
    assert!(member_review.can_reach(LifecycleState::Released));
    assert!(member_review.can_reach(LifecycleState::Draft));
    assert!(!member_review.read());

    let anonymous_released = resolve(LifecycleState::Released, Relation::Anonymous);
    assert!(anonymous_released.read());
    assert!(anonymous_released.list());
    assert!(!anonymous_released.update());
    assert!(anonymous_released.reachable_states.is_empty());

    let anonymous_draft = resolve(LifecycleState::Draft, Relation::Anonymous);
    assert!(anonymous_draft.is_empty());
}

#[test]
fn wildcard_rule_matches_every_state() {
    let store = store_with(&[
        (
            RuleSpec::new(EntityType::Image)
                .grant(Capabilities::LIST)
                .relations(RelationSet::PARTNER),
            "any_state",
        ),
        (
            RuleSpec::new(EntityType::Image)
                .from_state(LifecycleState::Archived)
                .grant(Capabilities::SHARE)
                .relations(RelationSet::PARTNER),
            "archived_only",
        ),
    ]);
    let resolver = CapabilityResolver::new(store);

    for state in LifecycleState::ALL {
        let answer = resolver
            .resolve(EntityType::Image, state, Relation::Partner)
            .unwrap();
        assert!(answer.list(), "wildcard rule missing in {}", state);
        assert_eq!(answer.share(), state == LifecycleState::Archived);
    }
}

#[test]
fn resolve_is_idempotent() {
    let resolver = CapabilityResolver::new(Arc::new(InMemoryRuleStore::with_defaults().unwrap()));
    for state in LifecycleState::ALL {
        for relation in Relation::BY_PRIORITY {
            let first = resolver.resolve(EntityType::Post, state, relation).unwrap();
            let second = resolver.resolve(EntityType::Post, state, relation).unwrap();
            assert_eq!(
                serde_json::to_vec(&first).unwrap(),
                serde_json::to_vec(&second).unwrap()
            );
        }
    }
}

#[test]
fn new_rule_is_visible_to_next_resolution() {
    let store = Arc::new(InMemoryRuleStore::new());
    let resolver = CapabilityResolver::new(store.clone());
    let before = resolver
        .resolve(EntityType::Event, LifecycleState::Draft, Relation::Participant)
        .unwrap();
    assert!(before.is_empty());

    let value = RuleSpec::new(EntityType::Event)
        .from_state(LifecycleState::Draft)
        .grant(Capabilities::UPDATE_COMMENT)
        .relations(RelationSet::ACTIVE)
        .pack()
        .unwrap();
    store
        .add_rule(StoredRule::new(value, "event_draft_comment"))
        .unwrap();

    let after = resolver
        .resolve(EntityType::Event, LifecycleState::Draft, Relation::Participant)
        .unwrap();
    assert!(after.capabilities.contains(Capabilities::UPDATE_COMMENT));
}

#[test]
fn summary_reports_gains_losses_and_reachability() {
    let resolver = CapabilityResolver::new(Arc::new(InMemoryRuleStore::with_defaults().unwrap()));
    let summary = resolver
        .summarize_transition(
            EntityType::Post,
            LifecycleState::Confirmed,
            LifecycleState::Released,
        )
        .unwrap();

    assert_eq!(summary.relations.len(), 6);
    // Only members approve posts; creators submit them.
    assert_eq!(summary.reachable_by, vec![Relation::Member]);

    let anonymous = summary.delta(Relation::Anonymous).unwrap();
    assert_eq!(anonymous.gained, Capabilities::READ | Capabilities::LIST);
    assert!(anonymous.lost.is_empty());
    assert!(!anonymous.can_transition);

    let participant = summary.delta(Relation::Participant).unwrap();
    assert!(participant.gained.is_empty());
    assert!(participant.lost.is_empty());
}

fn valid_rule() -> impl Strategy<Value = Rule> {
    (
        1u32..=7,
        0u32..=7,
        (0u32..=Field::Capability.max_value()).prop_map(|raw| raw & !CAPABILITY_HOLE),
        0u32..=7,
        0u32..=31,
    )
        .prop_map(|(entity, from, caps, to, rels)| {
            let value = codec::pack(0, entity, from, caps, to, rels).unwrap();
            Rule::new(value, format!("rule_{}", value))
        })
}

fn relation() -> impl Strategy<Value = Relation> {
    prop::sample::select(Relation::BY_PRIORITY.to_vec())
}

fn state() -> impl Strategy<Value = LifecycleState> {
    prop::sample::select(LifecycleState::ALL.to_vec())
}

fn entity() -> impl Strategy<Value = EntityType> {
    prop::sample::select(EntityType::ALL.to_vec())
}

proptest! {
    #[test]
    fn adding_a_rule_never_removes_a_grant(
        rules in prop::collection::vec(valid_rule(), 0..12),
        extra in valid_rule(),
        entity in entity(),
        state in state(),
        relation in relation(),
    ) {
        let before = resolve_rules(&rules, entity, state, relation);

        let mut extended = rules.clone();
        extended.push(extra);
        let after = resolve_rules(&extended, entity, state, relation);

        prop_assert!(after.capabilities.contains(before.capabilities));
        prop_assert!(after.reachable_states.is_superset(&before.reachable_states));
    }

    #[test]
    fn rule_order_does_not_change_the_grant(
        rules in prop::collection::vec(valid_rule(), 0..12),
        entity in entity(),
        state in state(),
        relation in relation(),
    ) {
        let forward = resolve_rules(&rules, entity, state, relation);
        let mut reversed = rules.clone();
        reversed.reverse();
        let backward = resolve_rules(&reversed, entity, state, relation);

        prop_assert_eq!(forward.capabilities, backward.capabilities);
        prop_assert_eq!(forward.reachable_states, backward.reachable_states);
    }

    #[test]
    fn role_mask_round_trips_through_relation(relation in relation()) {
        let mask = RoleMask::for_relation(relation);
        let expected = match relation {
            Relation::Owner => Relation::Anonymous,
            other => other,
        };
        prop_assert_eq!(mask.relation(), expected);
    }
}
