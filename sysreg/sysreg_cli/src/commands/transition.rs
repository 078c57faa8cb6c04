//! Transition validation command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::process::ExitCode;

use sysreg_capability::check::Grants;
use sysreg_core::error::{Error, TransitionError};
use sysreg_core::types::{EntityCategory, EntityType, LifecycleState, Relation};
use sysreg_lifecycle::{validate_transition, TransitionGate};

use crate::integration::print_json;

/// Exit status for a rejected transition.
pub const REJECTED: u8 = 2;

/// Arguments for the transition command
#[derive(Args)]
pub struct TransitionArgs {
    /// Entity category whose table applies
    #[clap(long)]
    pub category: EntityCategory,

    /// Current lifecycle state
    #[clap(long)]
    pub from: LifecycleState,

    /// Requested lifecycle state
    #[clap(long)]
    pub to: LifecycleState,

    /// Caller relation; unknown names are treated as anonymous
    #[clap(long)]
    pub relation: String,

    /// Also require a rule for this entity type to make the target reachable
    #[clap(long)]
    pub entity: Option<EntityType>,
}

#[derive(Serialize)]
struct TransitionOutput {
    allowed: bool,
    category: EntityCategory,
    from: &'static str,
    to: &'static str,
    relation: Relation,
    #[serde(skip_serializing_if = "Option::is_none")]
    grants: Option<Grants>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

fn error_kind(error: &TransitionError) -> &'static str {
    match error {
        TransitionError::InvalidTransition { .. } => "invalid_transition",
        TransitionError::InsufficientRelation { .. } => "insufficient_relation",
        TransitionError::NotPermitted { .. } => "not_permitted",
    }
}

pub fn execute_transition(args: &TransitionArgs, gate: &TransitionGate) -> Result<ExitCode> {
    let relation = Relation::from_name_or_anonymous(&args.relation);

    let outcome = match args.entity {
        Some(entity) => gate
            .authorize(args.category, entity, args.from, args.to, relation)
            .map(|answer| Some(answer.grants())),
        None => validate_transition(args.category, args.from, args.to, relation)
            .map(|()| None)
            .map_err(Error::from),
    };

    let mut output = TransitionOutput {
        allowed: false,
        category: args.category,
        from: args.category.state_label(args.from),
        to: args.category.state_label(args.to),
        relation,
        grants: None,
        error: None,
        message: None,
    };

    match outcome {
        Ok(grants) => {
            output.allowed = true;
            output.grants = grants;
            print_json(&output)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(Error::Transition(rejection)) => {
            output.error = Some(error_kind(&rejection));
            output.message = Some(rejection.to_string());
            print_json(&output)?;
            Ok(ExitCode::from(REJECTED))
        }
        Err(other) => Err(other.into()),
    }
}
