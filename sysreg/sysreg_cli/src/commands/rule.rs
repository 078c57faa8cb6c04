//! Rule inspection commands: decode, encode and list.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use sysreg_capability::store::RuleStore;
use sysreg_core::codec::{self, RuleFields};
use sysreg_core::types::{
    Capability, DecodedRule, EntityType, LifecycleState, Relation, RuleLogic, RuleSpec,
};

use crate::integration::print_json;

/// Parses a rule value given in decimal or `0x` hex.
fn parse_rule_value(input: &str) -> Result<u32, String> {
    let input = input.trim();
    let parsed = match input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => input.parse(),
    };
    parsed.map_err(|e| format!("invalid rule value '{}': {}", input, e))
}

/// Arguments for the decode command
#[derive(Args)]
pub struct DecodeArgs {
    /// Rule value, decimal or 0x-prefixed hex
    #[clap(value_parser = parse_rule_value)]
    pub value: u32,
}

/// Arguments for the encode command
#[derive(Args)]
pub struct EncodeArgs {
    /// Entity type the rule governs
    #[clap(long)]
    pub entity: EntityType,

    /// Project scope, 0 for all
    #[clap(long, default_value_t = 0)]
    pub scope: u32,

    /// State the rule applies from; omit for any state
    #[clap(long)]
    pub from: Option<LifecycleState>,

    /// Target state for a transition rule
    #[clap(long)]
    pub to: Option<LifecycleState>,

    /// Granted capability, repeatable
    #[clap(long = "cap")]
    pub capabilities: Vec<Capability>,

    /// Relation the rule applies to, repeatable
    #[clap(long = "rel")]
    pub relations: Vec<Relation>,
}

/// Arguments for the rules command
#[derive(Args)]
pub struct RulesArgs {
    /// Only rules for this entity type
    #[clap(long)]
    pub entity: Option<EntityType>,
}

#[derive(Serialize)]
struct DecodeOutput {
    value: u32,
    hex: String,
    fields: RuleFields,
    decoded: DecodedRule,
    description: String,
}

#[derive(Serialize)]
struct RuleListing {
    id: u64,
    name: String,
    value: u32,
    logic: RuleLogic,
    immutable: bool,
    description: String,
    rule: String,
}

pub fn execute_decode(args: &DecodeArgs) -> Result<()> {
    let decoded = DecodedRule::from_value(args.value);
    print_json(&DecodeOutput {
        value: args.value,
        hex: format!("{:#010x}", args.value),
        fields: codec::unpack(args.value),
        decoded,
        description: decoded.to_string(),
    })
}

pub fn execute_encode(args: &EncodeArgs) -> Result<()> {
    let mut spec = RuleSpec::new(args.entity)
        .scope(args.scope)
        .grant(args.capabilities.iter().copied().collect())
        .relations(args.relations.iter().copied().collect());
    if let Some(from) = args.from {
        spec = spec.from_state(from);
    }
    if let Some(to) = args.to {
        spec = spec.to_state(to);
    }

    let value = spec.pack().context("packing rule")?;
    let decoded = DecodedRule::from_value(value);
    print_json(&DecodeOutput {
        value,
        hex: format!("{:#010x}", value),
        fields: codec::unpack(value),
        decoded,
        description: decoded.to_string(),
    })
}

pub fn execute_rules(args: &RulesArgs, store: &dyn RuleStore) -> Result<()> {
    let listing: Vec<RuleListing> = store
        .list_rules()
        .context("listing rules")?
        .into_iter()
        .filter(|rule| args.entity.is_none() || rule.decode().entity == args.entity)
        .map(|rule| RuleListing {
            id: rule.id.get(),
            rule: rule.decode().to_string(),
            name: rule.name,
            value: rule.value,
            logic: rule.logic,
            immutable: rule.immutable,
            description: rule.description,
        })
        .collect();
    print_json(&listing)
}
