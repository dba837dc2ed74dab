//! CLI command definitions and one-shot command execution.
//!
//! The ledger is memory-bound to a session, so one-shot commands cover the
//! durable state only: proposals and the enrollment registry.

use clap::{Parser, Subcommand};
use dialoguer::Password;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use votary_governance::Governance;
use votary_storage::{IdentityRegistry, ProposalStore};
use votary_types::{VoteChoice, VoterId};

use crate::config::CliConfig;
use crate::output::*;
use crate::session::Session;

/// Main CLI.
#[derive(Parser)]
#[command(name = "votary")]
#[command(about = "Votary - identity-gated voting on a tamper-evident ledger")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Data directory (overrides the configured one)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log filter, e.g. "info" or "votary=debug"
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands. Without one, the interactive session starts.
#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive voting session
    Session,

    /// Proposal operations
    #[command(subcommand)]
    Proposal(ProposalCommands),

    /// Identity enrollment registry
    #[command(subcommand)]
    Registry(RegistryCommands),

    /// Configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Proposal commands.
#[derive(Subcommand)]
pub enum ProposalCommands {
    /// Submit a new proposal
    Create {
        /// Proposer identity token (12 digits)
        proposer: String,
        /// Proposal text
        text: String,
    },
    /// Vote on an open proposal
    Vote {
        /// Voter identity token (12 digits)
        voter: String,
        /// Proposal id
        id: u64,
        /// "for" or "against"
        choice: String,
    },
    /// List proposals
    List {
        /// Include resolved proposals
        #[arg(long)]
        all: bool,
    },
}

/// Registry commands.
#[derive(Subcommand)]
pub enum RegistryCommands {
    /// Enroll an identity with a template produced by the capture pipeline
    Enroll {
        /// Identity token (12 digits)
        voter: String,
        /// Path to the opaque template blob
        #[arg(short, long)]
        template: Option<PathBuf>,
    },
    /// List enrolled identities
    List,
    /// Remove an enrolled identity
    Remove {
        /// Identity token (12 digits)
        voter: String,
    },
}

/// Config commands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the active configuration
    Show,
    /// Write the default configuration file
    Init,
}

/// Execute the parsed command line.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let mut config = CliConfig::load()?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    tracing::debug!(data_dir = %config.data_dir.display(), "using data directory");

    match cli.command.unwrap_or(Commands::Session) {
        Commands::Session => Session::new(&config)?.run(),
        Commands::Proposal(cmd) => execute_proposal(cmd, &config),
        Commands::Registry(cmd) => execute_registry(cmd, &config),
        Commands::Config(cmd) => execute_config(cmd, &config),
    }
}

pub(crate) fn open_governance(config: &CliConfig) -> anyhow::Result<Governance> {
    let store = ProposalStore::new(config.proposals_path())?;
    Ok(Governance::with_config(store, config.governance_config()))
}

pub(crate) fn open_registry(config: &CliConfig) -> anyhow::Result<IdentityRegistry> {
    Ok(IdentityRegistry::new(config.registry_path())?)
}

pub(crate) fn unix_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

fn execute_proposal(cmd: ProposalCommands, config: &CliConfig) -> anyhow::Result<()> {
    let governance = open_governance(config)?;

    match cmd {
        ProposalCommands::Create { proposer, text } => {
            let proposer: VoterId = proposer.parse()?;
            let proposal = governance.create_proposal(proposer, &text)?;
            print_success(&format!("Proposal #{} submitted", proposal.id));
        }
        ProposalCommands::Vote { voter, id, choice } => {
            let voter: VoterId = voter.parse()?;
            let choice: VoteChoice = choice.parse()?;
            let proposal = governance.cast_vote(voter, id, choice)?;
            print_success(&format!(
                "Vote recorded on proposal #{} ({} for / {} against, {})",
                proposal.id,
                proposal.votes_for.len(),
                proposal.votes_against.len(),
                proposal.status
            ));
        }
        ProposalCommands::List { all } => {
            let proposals = if all {
                governance.list_all()?
            } else {
                governance.list_open()?
            };
            if proposals.is_empty() {
                print_info("No proposals");
            } else {
                print_proposal_table(&proposals);
            }
        }
    }

    Ok(())
}

fn execute_registry(cmd: RegistryCommands, config: &CliConfig) -> anyhow::Result<()> {
    let registry = open_registry(config)?;

    match cmd {
        RegistryCommands::Enroll { voter, template } => {
            require_admin(config)?;
            let voter: VoterId = voter.parse()?;
            let template = match template {
                Some(path) => std::fs::read(path)?,
                None => Vec::new(),
            };
            registry.enroll(voter, template, unix_timestamp_ms())?;
            print_success(&format!("Enrolled {}", voter));
        }
        RegistryCommands::List => {
            let records = registry.load_all()?;
            if records.is_empty() {
                print_info("No identities enrolled");
            } else {
                for record in records {
                    println!("{}", record.voter);
                }
            }
        }
        RegistryCommands::Remove { voter } => {
            require_admin(config)?;
            let voter: VoterId = voter.parse()?;
            registry.remove(&voter)?;
            print_success(&format!("Removed {}", voter));
        }
    }

    Ok(())
}

fn execute_config(cmd: ConfigCommands, config: &CliConfig) -> anyhow::Result<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("{}", toml::to_string_pretty(config)?);
        }
        ConfigCommands::Init => {
            let config = CliConfig::default();
            config.save()?;
            print_success(&format!(
                "Wrote default config to {}",
                CliConfig::config_path()?.display()
            ));
        }
    }

    Ok(())
}

fn require_admin(config: &CliConfig) -> anyhow::Result<()> {
    let Some(expected) = &config.admin_password else {
        return Ok(());
    };

    let entered = Password::new().with_prompt("Admin password").interact()?;
    if &entered != expected {
        anyhow::bail!("Access denied");
    }
    Ok(())
}
