use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use sysreg_capability::check::CapabilityResolver;
use sysreg_core::utils::LogLevel;
use sysreg_lifecycle::TransitionGate;

mod commands;
mod integration;

use commands::check::{ResolveArgs, SummaryArgs};
use commands::rule::{DecodeArgs, EncodeArgs, RulesArgs};
use commands::transition::TransitionArgs;

/// Sysreg capability engine
///
/// Inspect packed rules, resolve what a caller may do with an entity, and
/// check lifecycle transitions. All output is JSON on stdout; logs go to
/// stderr.
#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Engine config file (TOML)
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error
    #[clap(long, global = true)]
    log_level: Option<LogLevel>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Unpack a rule integer into named fields
    Decode(DecodeArgs),

    /// Pack symbolic fields into a rule integer
    Encode(EncodeArgs),

    /// Resolve capabilities for an entity, state and relation
    Resolve(ResolveArgs),

    /// Validate a lifecycle transition
    Transition(TransitionArgs),

    /// Show how each relation's capabilities change across a transition
    Summary(SummaryArgs),

    /// List stored rules
    Rules(RulesArgs),
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = integration::load_config(cli.config.as_deref())?;
    integration::init_logging(cli.log_level, &config);

    match &cli.command {
        Commands::Decode(args) => commands::rule::execute_decode(args)?,
        Commands::Encode(args) => commands::rule::execute_encode(args)?,
        Commands::Resolve(args) => {
            let store = integration::build_store(&config)?;
            let resolver = CapabilityResolver::new(Arc::new(store));
            commands::check::execute_resolve(args, &resolver)?
        }
        Commands::Transition(args) => {
            let store = integration::build_store(&config)?;
            let gate = TransitionGate::new(Arc::new(store));
            return commands::transition::execute_transition(args, &gate);
        }
        Commands::Summary(args) => {
            let store = integration::build_store(&config)?;
            let resolver = CapabilityResolver::new(Arc::new(store));
            commands::check::execute_summary(args, &resolver)?
        }
        Commands::Rules(args) => {
            let store = integration::build_store(&config)?;
            commands::rule::execute_rules(args, &store)?
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
