//! Output formatting utilities.
//!
//! Pretty printing for session screens and one-shot commands.

use colored::Colorize;
use tabled::{Table, Tabled};
use votary_types::{Block, Proposal, VoteRecord};

/// Print success message.
pub fn print_success(msg: &str) {
    println!("{}", format!("✓ {}", msg).green());
}

/// Print error message.
pub fn print_error(msg: &str) {
    eprintln!("{}", format!("✗ {}", msg).red());
}

/// Print warning message.
pub fn print_warning(msg: &str) {
    println!("{}", format!("⚠ {}", msg).yellow());
}

/// Print info message.
pub fn print_info(msg: &str) {
    println!("{}", format!("ℹ {}", msg).blue());
}

/// Print proposals with vote counts and status.
pub fn print_proposal_table(proposals: &[Proposal]) {
    #[derive(Tabled)]
    struct ProposalRow {
        id: u64,
        text: String,
        #[tabled(rename = "for")]
        votes_for: usize,
        #[tabled(rename = "against")]
        votes_against: usize,
        status: String,
    }

    let rows: Vec<ProposalRow> = proposals
        .iter()
        .map(|p| ProposalRow {
            id: p.id,
            text: truncate(&p.text, 48),
            votes_for: p.votes_for.len(),
            votes_against: p.votes_against.len(),
            status: p.status.to_string(),
        })
        .collect();

    let table = Table::new(rows);
    println!("{}", table);
}

/// Print the ledger's vote history in chain order.
pub fn print_history_table(history: &[&VoteRecord]) {
    #[derive(Tabled)]
    struct HistoryRow {
        voter: String,
        choice: String,
    }

    let rows: Vec<HistoryRow> = history
        .iter()
        .map(|record| HistoryRow {
            voter: record.voter.to_string(),
            choice: record.choice.clone(),
        })
        .collect();

    let table = Table::new(rows);
    println!("{}", table);
}

/// Format a block reference for confirmation messages.
pub fn format_block(block: &Block) -> String {
    let hex = block.hash.to_hex();
    format!("block #{} (0x{}…{})", block.index, &hex[..8], &hex[hex.len() - 8..])
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}
