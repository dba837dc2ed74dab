//! Interactive voting session.
//!
//! Owns one ledger for its lifetime, so vote deduplication spans the
//! session. Governance and registry state is durable and shared with the
//! one-shot commands.

use anyhow::Result;
use dialoguer::{Input, Password, Select};
use votary_governance::{Governance, GovernanceError};
use votary_ledger::Ledger;
use votary_storage::IdentityRegistry;
use votary_types::{VoteChoice, VoteRecord, VoterId};

use crate::commands::{open_governance, open_registry, unix_timestamp_ms};
use crate::config::CliConfig;
use crate::identity::{IdentityVerifier, RegistryVerifier};
use crate::output::*;

const MENU: &[&str] = &[
    "Cast vote",
    "View vote history",
    "Create proposal",
    "Vote on proposal",
    "View proposals",
    "Enroll voter",
    "View enrolled voters",
    "Remove voter",
    "Exit",
];

/// One interactive run of the voting application.
pub struct Session {
    ledger: Ledger,
    governance: Governance,
    registry: IdentityRegistry,
    admin_password: Option<String>,
}

impl Session {
    /// Build a session over the configured data directory.
    pub fn new(config: &CliConfig) -> Result<Self> {
        Ok(Self {
            ledger: Ledger::new(),
            governance: open_governance(config)?,
            registry: open_registry(config)?,
            admin_password: config.admin_password.clone(),
        })
    }

    /// Run the menu loop until the user exits.
    pub fn run(&mut self) -> Result<()> {
        loop {
            println!();
            let selection = Select::new()
                .with_prompt("votary")
                .items(MENU)
                .default(0)
                .interact()?;

            match selection {
                0 => self.cast_vote()?,
                1 => self.view_history(),
                2 => self.create_proposal()?,
                3 => self.vote_on_proposal()?,
                4 => self.view_proposals()?,
                5 => self.enroll_voter()?,
                6 => self.view_enrolled()?,
                7 => self.remove_voter()?,
                _ => break,
            }
        }
        Ok(())
    }

    fn cast_vote(&mut self) -> Result<()> {
        let Some(voter) = self.verify_identity()? else {
            print_error("Identity not recognized");
            return Ok(());
        };

        if self.ledger.has_voted(&voter) {
            print_warning("You have already voted");
            return Ok(());
        }

        let choice: String = Input::new()
            .with_prompt("Ballot choice")
            .validate_with(|input: &String| -> Result<(), &str> {
                if input.trim().is_empty() {
                    Err("choice cannot be empty")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;

        let block = self.ledger.append(VoteRecord {
            voter,
            choice: choice.trim().to_string(),
        });
        print_success(&format!("Vote recorded in {}", format_block(&block)));
        Ok(())
    }

    fn view_history(&self) {
        let history = self.ledger.history();
        if history.is_empty() {
            print_info("No votes recorded yet");
        } else {
            print_history_table(&history);
        }
    }

    fn create_proposal(&self) -> Result<()> {
        // Governance actions take the token by direct entry
        let proposer = self.prompt_identity("Proposer identity token (12 digits)")?;
        let text: String = Input::new().with_prompt("Proposal text").interact_text()?;

        match self.governance.create_proposal(proposer, &text) {
            Ok(proposal) => print_success(&format!("Proposal #{} submitted", proposal.id)),
            Err(e) => print_error(&e.to_string()),
        }
        Ok(())
    }

    fn vote_on_proposal(&self) -> Result<()> {
        let open = self.governance.list_open()?;
        if open.is_empty() {
            print_info("No open proposals");
            return Ok(());
        }
        print_proposal_table(&open);

        let voter = self.prompt_identity("Voter identity token (12 digits)")?;
        let id: u64 = Input::new().with_prompt("Proposal id").interact_text()?;

        let choices = [VoteChoice::For, VoteChoice::Against];
        let selected = Select::new()
            .with_prompt("Your vote")
            .items(&["for", "against"])
            .default(0)
            .interact()?;

        match self.governance.cast_vote(voter, id, choices[selected]) {
            Ok(proposal) => {
                print_success(&format!("Vote recorded on proposal #{}", proposal.id));
                if proposal.status.is_terminal() {
                    print_info(&format!("Proposal #{} is now {}", proposal.id, proposal.status));
                }
            }
            Err(e @ GovernanceError::Storage(_)) => return Err(e.into()),
            Err(e) => print_error(&e.to_string()),
        }
        Ok(())
    }

    fn view_proposals(&self) -> Result<()> {
        let proposals = self.governance.list_all()?;
        if proposals.is_empty() {
            print_info("No proposals found");
        } else {
            print_proposal_table(&proposals);
        }
        Ok(())
    }

    fn enroll_voter(&self) -> Result<()> {
        if !self.check_admin()? {
            print_error("Access denied");
            return Ok(());
        }

        let voter = self.prompt_identity("Identity token (12 digits)")?;
        let template_path: String = Input::new()
            .with_prompt("Template file from capture pipeline (blank for none)")
            .allow_empty(true)
            .interact_text()?;
        let template = if template_path.trim().is_empty() {
            Vec::new()
        } else {
            std::fs::read(template_path.trim())?
        };

        match self.registry.enroll(voter, template, unix_timestamp_ms()) {
            Ok(record) => print_success(&format!("Enrolled {}", record.voter)),
            Err(e) => print_error(&e.to_string()),
        }
        Ok(())
    }

    fn view_enrolled(&self) -> Result<()> {
        let records = self.registry.load_all()?;
        if records.is_empty() {
            print_info("No identities enrolled");
        } else {
            for record in records {
                println!("{}", record.voter);
            }
        }
        Ok(())
    }

    fn remove_voter(&self) -> Result<()> {
        if !self.check_admin()? {
            print_error("Access denied");
            return Ok(());
        }

        let voter = self.prompt_identity("Identity token (12 digits)")?;
        match self.registry.remove(&voter) {
            Ok(()) => print_success(&format!("Removed {}", voter)),
            Err(e) => print_error(&e.to_string()),
        }
        Ok(())
    }

    /// Resolve the voter for a ledger vote through the verifier seam.
    fn verify_identity(&self) -> Result<Option<VoterId>> {
        let claim: String = Input::new()
            .with_prompt("Identity token (12 digits)")
            .validate_with(|input: &String| -> Result<(), &str> {
                if input.trim().parse::<VoterId>().is_ok() {
                    Ok(())
                } else {
                    Err("must be exactly 12 digits")
                }
            })
            .interact_text()?;

        let verifier = RegistryVerifier::new(&self.registry);
        verifier.resolve(claim.trim().as_bytes())
    }

    fn prompt_identity(&self, prompt: &str) -> Result<VoterId> {
        let input: String = Input::new()
            .with_prompt(prompt)
            .validate_with(|input: &String| -> Result<(), &str> {
                if input.trim().parse::<VoterId>().is_ok() {
                    Ok(())
                } else {
                    Err("must be exactly 12 digits")
                }
            })
            .interact_text()?;
        Ok(input.trim().parse()?)
    }

    fn check_admin(&self) -> Result<bool> {
        let Some(expected) = &self.admin_password else {
            return Ok(true);
        };
        let entered = Password::new().with_prompt("Admin password").interact()?;
        Ok(&entered == expected)
    }
}
