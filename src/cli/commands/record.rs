use anyhow::{Context, Result};
use clap::Args;

use crate::cli::commands::AppContext;
use crate::domain::models::Interaction;

#[derive(Args)]
pub struct RecordArgs {
    /// Caller-facing agent identifier
    pub agent_id: String,

    /// Upstream risk signal in [0,1]
    #[arg(long, default_value_t = 0.0)]
    pub risk_score: f64,

    /// Count of flagged behavior events
    #[arg(long, default_value_t = 0)]
    pub behavior_flags: u32,

    /// Count of security-detection events
    #[arg(long, default_value_t = 0)]
    pub detections: u32,

    /// Prompt/input text
    #[arg(long)]
    pub input: Option<String>,

    /// Response text
    #[arg(long)]
    pub response: Option<String>,
}

pub async fn execute(args: RecordArgs, json: bool) -> Result<()> {
    let ctx = AppContext::init().await?;

    let agent = ctx
        .agents
        .get_by_agent_id(&args.agent_id, ctx.config.tenant_id)
        .await?
        .with_context(|| format!("Agent '{}' not found", args.agent_id))?;

    let mut interaction = Interaction::new(agent.id, ctx.config.tenant_id)
        .with_risk_score(args.risk_score)
        .with_behavior_flags(args.behavior_flags)
        .with_detection_count(args.detections);
    if let Some(input) = args.input {
        interaction = interaction.with_input(input);
    }
    if let Some(response) = args.response {
        interaction = interaction.with_response(response);
    }

    ctx.interactions
        .insert(&interaction)
        .await
        .context("Failed to record interaction")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&interaction)?);
    } else {
        println!("Interaction recorded:");
        println!("  ID: {}", interaction.id);
        println!("  Agent: {}", agent.agent_id);
        println!("  Risk score: {:.2}", interaction.risk_score);
    }

    Ok(())
}
