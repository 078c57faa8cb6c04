use serde::Serialize;

use sysreg_core::types::{EntityCategory, LifecycleState, RelationGate};

use LifecycleState::{Archived, Confirmed, Demo, Draft, New, Released, Trash};

/// Adjacency map of legal state changes for one entity category.
///
/// Every move may additionally require a relation gate, and entering
/// Archived or Trash is always reserved to the owner, whatever the rules
/// would otherwise allow.
#[derive(Debug, Serialize)]
pub struct TransitionTable {
    category: EntityCategory,
    edges: &'static [(LifecycleState, &'static [LifecycleState])],
    /// Required for every move in this table
    actor: Option<RelationGate>,
}

/// Targets only the owner may enter, in every category.
const OWNER_ONLY: [LifecycleState; 2] = [Archived, Trash];

// Only the owner or a member holding the creator role may move a project.
static PROJECT: TransitionTable = TransitionTable {
    category: EntityCategory::Project,
    edges: &[
        (New, &[Demo, Draft, Confirmed]),
        (Demo, &[Draft, Confirmed]),
        (Draft, &[Demo, Confirmed, Trash]),
        (Confirmed, &[Draft, Released, Trash]),
        (Released, &[Confirmed, Archived, Trash]),
        (Archived, &[Released, Trash]),
        (Trash, &[Draft]),
    ],
    actor: Some(RelationGate::OwnerOrCreator),
};

// The account holder is the owner of a user record.
static USER: TransitionTable = TransitionTable {
    category: EntityCategory::User,
    edges: &[
        (New, &[Demo, Trash]),
        (Demo, &[Draft, Trash]),
        (Draft, &[Confirmed, Trash]),
        (Confirmed, &[Released, Trash]),
        (Released, &[Archived, Trash]),
        (Archived, &[Released, Trash]),
        (Trash, &[Draft]),
    ],
    actor: None,
};

// Posts, events and images share one table. Confirmed is shown as "review".
static CONTENT_EDGES: &[(LifecycleState, &[LifecycleState])] = &[
    (New, &[Draft, Trash]),
    (Draft, &[Confirmed, Trash]),
    (Confirmed, &[Released, Draft, Trash]),
    (Released, &[Archived, Draft, Trash]),
    (Archived, &[Released, Trash]),
    (Trash, &[Draft]),
];

static POST: TransitionTable = TransitionTable {
    category: EntityCategory::Post,
    edges: CONTENT_EDGES,
    actor: None,
};

static EVENT: TransitionTable = TransitionTable {
    category: EntityCategory::Event,
    edges: CONTENT_EDGES,
    actor: None,
};

static IMAGE: TransitionTable = TransitionTable {
    category: EntityCategory::Image,
    edges: CONTENT_EDGES,
    actor: None,
};

static TASK: TransitionTable = TransitionTable {
    category: EntityCategory::Task,
    edges: &[
        (New, &[Draft]),
        (Draft, &[Confirmed, Trash]),
        (Confirmed, &[Released, Draft]),
        (Released, &[Archived]),
        (Archived, &[Trash]),
        (Trash, &[Draft]),
    ],
    actor: None,
};

impl TransitionTable {
    /// The table governing `category`.
    pub fn for_category(category: EntityCategory) -> &'static TransitionTable {
        match category {
            EntityCategory::Project => &PROJECT,
            EntityCategory::User => &USER,
            EntityCategory::Post => &POST,
            EntityCategory::Event => &EVENT,
            EntityCategory::Image => &IMAGE,
            EntityCategory::Task => &TASK,
        }
    }

    pub fn category(&self) -> EntityCategory {
        self.category
    }

    /// States this category uses, in lifecycle order.
    pub fn states(&self) -> impl Iterator<Item = LifecycleState> + '_ {
        self.edges.iter().map(|(state, _)| *state)
    }

    /// Legal successors of `from`; empty if the category has no such state.
    pub fn successors(&self, from: LifecycleState) -> &'static [LifecycleState] {
        self.edges
            .iter()
            .find(|(state, _)| *state == from)
            .map(|(_, targets)| *targets)
            .unwrap_or_default()
    }

    /// Whether `from -> to` is in the table. Self-loops never are.
    pub fn is_legal(&self, from: LifecycleState, to: LifecycleState) -> bool {
        from != to && self.successors(from).contains(&to)
    }

    /// Whether entering `to` is reserved to the owner.
    pub fn is_owner_only(&self, to: LifecycleState) -> bool {
        OWNER_ONLY.contains(&to)
    }

    /// The relation gate on entering `to`, if any. The owner-only gate
    /// takes precedence over the table's gate for every move.
    pub fn gate(&self, to: LifecycleState) -> Option<RelationGate> {
        if self.is_owner_only(to) {
            Some(RelationGate::Owner)
        } else {
            self.actor
        }
    }
}
