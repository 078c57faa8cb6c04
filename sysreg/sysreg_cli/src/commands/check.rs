//! Capability queries: resolve and summary.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::collections::BTreeSet;

use sysreg_capability::check::{CapabilityResolver, Grants};
use sysreg_core::codec::Capabilities;
use sysreg_core::types::{EntityType, LifecycleState, Relation};

use crate::integration::print_json;

/// Arguments for the resolve command
#[derive(Args)]
pub struct ResolveArgs {
    /// Entity type
    #[clap(long)]
    pub entity: EntityType,

    /// Current lifecycle state
    #[clap(long)]
    pub state: LifecycleState,

    /// Caller relation; unknown names are treated as anonymous
    #[clap(long)]
    pub relation: String,
}

/// Arguments for the summary command
#[derive(Args)]
pub struct SummaryArgs {
    /// Entity type
    #[clap(long)]
    pub entity: EntityType,

    /// Current lifecycle state
    #[clap(long)]
    pub from: LifecycleState,

    /// Target lifecycle state
    #[clap(long)]
    pub to: LifecycleState,
}

#[derive(Serialize)]
struct ResolveOutput {
    entity: EntityType,
    state: LifecycleState,
    relation: Relation,
    grants: Grants,
    can_manage_any: bool,
    capabilities: Capabilities,
    reachable_states: BTreeSet<LifecycleState>,
    matched_rules: Vec<String>,
}

pub fn execute_resolve(args: &ResolveArgs, resolver: &CapabilityResolver) -> Result<()> {
    let relation = Relation::from_name_or_anonymous(&args.relation);
    let answer = resolver
        .resolve(args.entity, args.state, relation)
        .context("resolving capabilities")?;

    print_json(&ResolveOutput {
        entity: args.entity,
        state: args.state,
        relation,
        grants: answer.grants(),
        can_manage_any: answer.can_manage_any(),
        capabilities: answer.capabilities,
        reachable_states: answer.reachable_states,
        matched_rules: answer.matched_rules,
    })
}

pub fn execute_summary(args: &SummaryArgs, resolver: &CapabilityResolver) -> Result<()> {
    let summary = resolver
        .summarize_transition(args.entity, args.from, args.to)
        .context("summarizing transition")?;
    print_json(&summary)
}
