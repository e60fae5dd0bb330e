use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::cli::commands::AppContext;
use crate::cli::output::table::format_agent_table;
use crate::domain::models::Agent;

#[derive(Args)]
pub struct AgentArgs {
    #[command(subcommand)]
    pub command: AgentCommand,
}

#[derive(Subcommand)]
pub enum AgentCommand {
    /// Register a new agent
    Register {
        /// Caller-facing agent identifier
        agent_id: String,
        /// Human-readable name
        #[arg(long)]
        name: Option<String>,
    },
    /// List registered agents
    List,
}

pub async fn execute(args: AgentArgs, json: bool) -> Result<()> {
    let ctx = AppContext::init().await?;

    match args.command {
        AgentCommand::Register { agent_id, name } => {
            if ctx
                .agents
                .get_by_agent_id(&agent_id, ctx.config.tenant_id)
                .await?
                .is_some()
            {
                anyhow::bail!("Agent '{agent_id}' is already registered");
            }

            let name = name.unwrap_or_else(|| agent_id.clone());
            let agent = Agent::new(agent_id, name, ctx.config.tenant_id);
            ctx.agents
                .insert(&agent)
                .await
                .context("Failed to register agent")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&agent)?);
            } else {
                println!("Agent registered:");
                println!("  ID: {}", agent.agent_id);
                println!("  Name: {}", agent.name);
            }
        }
        AgentCommand::List => {
            let agents = ctx.agents.list(ctx.config.tenant_id).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&agents)?);
            } else if agents.is_empty() {
                println!("No agents registered.");
            } else {
                println!("{}", format_agent_table(&agents));
                println!("\n{} agent(s)", agents.len());
            }
        }
    }

    Ok(())
}
