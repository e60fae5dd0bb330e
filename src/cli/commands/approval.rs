use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use uuid::Uuid;

use crate::cli::commands::AppContext;
use crate::cli::output::table::format_pending_table;
use crate::domain::models::DecisionStatus;

#[derive(Args)]
pub struct ApprovalArgs {
    #[command(subcommand)]
    pub command: ApprovalCommand,
}

#[derive(Subcommand)]
pub enum ApprovalCommand {
    /// Validate an agent's interaction against its trust score
    Validate {
        /// Caller-facing agent identifier
        agent_id: String,
        /// Interaction to validate
        #[arg(long)]
        interaction: Option<Uuid>,
        /// Require manual approval regardless of score
        #[arg(long)]
        force: bool,
    },
    /// Resolve a pending approval
    Resolve {
        /// Caller-facing agent identifier
        agent_id: String,
        /// Interaction being resolved
        #[arg(long)]
        interaction: Option<Uuid>,
        /// Username of the approver
        #[arg(long)]
        approver: String,
        /// Reject instead of approve
        #[arg(long)]
        reject: bool,
    },
    /// List interactions awaiting approval
    Pending,
}

pub async fn execute(args: ApprovalArgs, json: bool) -> Result<()> {
    let ctx = AppContext::init().await?;
    let workflow = ctx.workflow();

    match args.command {
        ApprovalCommand::Validate {
            agent_id,
            interaction,
            force,
        } => {
            let agent = ctx
                .agents
                .get_by_agent_id(&agent_id, ctx.config.tenant_id)
                .await?
                .with_context(|| format!("Agent '{agent_id}' not found"))?;

            let interaction = match interaction {
                Some(id) => Some(
                    ctx.interactions
                        .get(id, agent.id, ctx.config.tenant_id)
                        .await?
                        .with_context(|| format!("Interaction {id} not found"))?,
                ),
                None => None,
            };

            let decision = workflow
                .validate_interaction(&agent, interaction.as_ref(), force)
                .await?;

            // The workflow itself never writes; the outer adapter marks
            // the gated interaction pending so listings pick it up.
            if decision.status == DecisionStatus::PendingApproval {
                if let Some(interaction) = &interaction {
                    workflow.mark_pending(interaction.id).await?;
                }
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&decision)?);
            } else {
                println!("Validation result for {agent_id}:");
                println!("  Status: {}", decision.status.as_str());
                println!("  Trust score: {:.3}", decision.trust_score.overall_score);
                println!("  Confidence: {:.3}", decision.trust_score.confidence);
                println!("  {}", decision.message);
            }
        }
        ApprovalCommand::Resolve {
            agent_id,
            interaction,
            approver,
            reject,
        } => {
            let resolution = workflow
                .handle_approval(&agent_id, interaction, !reject, &approver)
                .await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&resolution)?);
            } else {
                println!("Approval resolved:");
                println!("  Agent: {}", resolution.agent_id);
                println!("  Status: {}", resolution.status.as_str());
                if let Some(id) = resolution.interaction_id {
                    println!("  Interaction: {id}");
                }
                println!("  Approver: {}", resolution.approver);
            }
        }
        ApprovalCommand::Pending => {
            let pending = workflow.list_pending_approvals().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&pending)?);
            } else if pending.is_empty() {
                println!("No pending approvals.");
            } else {
                println!("{}", format_pending_table(&pending));
                println!("\n{} pending approval(s)", pending.len());
            }
        }
    }

    Ok(())
}
