//! Votary CLI - identity-gated voting with DAO-style governance.
//!
//! The interaction surface over the core crates: an interactive session
//! for casting ledger votes, plus one-shot subcommands for the durable
//! governance and registry state.

pub mod commands;
pub mod config;
pub mod identity;
pub mod output;
pub mod session;
pub mod telemetry;

use clap::Parser;
use colored::Colorize;

fn main() -> anyhow::Result<()> {
    let cli = commands::Cli::parse();

    telemetry::init_telemetry(&cli.log_level, cli.log_json)?;

    if let Err(e) = commands::execute(cli) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }

    Ok(())
}
