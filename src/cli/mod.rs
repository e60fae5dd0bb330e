//! Command-line surface over the trust and approval services.
//!
//! Thin adapters only: argument parsing, service wiring, and output
//! formatting. All decisions live in `services`.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// Trust scoring and human-in-the-loop approval gating for agents.
#[derive(Parser)]
#[command(name = "trustgate", version, about)]
pub struct Cli {
    /// Emit machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the project database and config
    Init(commands::init::InitArgs),
    /// Register and inspect agents
    Agent(commands::agent::AgentArgs),
    /// Record an interaction for an agent
    Record(commands::record::RecordArgs),
    /// Trust scores, history, and analytics
    Trust(commands::trust::TrustArgs),
    /// Validate interactions and resolve approvals
    Approval(commands::approval::ApprovalArgs),
}

/// Report a fatal error and exit non-zero.
pub fn handle_error(err: anyhow::Error, json: bool) -> ! {
    if json {
        let payload = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!("{payload}");
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
