use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::{Args, Subcommand};

use crate::cli::commands::AppContext;
use crate::cli::output::table::{format_breakdown_table, format_history_table};

#[derive(Args)]
pub struct TrustArgs {
    #[command(subcommand)]
    pub command: TrustCommand,
}

#[derive(Subcommand)]
pub enum TrustCommand {
    /// Compute the current trust score for an agent
    Score {
        /// Caller-facing agent identifier
        agent_id: String,
        /// Restrict scoring to the trailing window, in hours
        #[arg(long)]
        window_hours: Option<i64>,
    },
    /// Daily trust score series for an agent
    History {
        agent_id: String,
        /// Days to look back
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
    /// Per-interaction score statistics for an agent
    Analytics {
        agent_id: String,
        /// Days to analyze
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
    /// Aggregate trust statistics across all agents in the tenant
    Summary {
        /// Days to analyze
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
}

pub async fn execute(args: TrustArgs, json: bool) -> Result<()> {
    let ctx = AppContext::init().await?;

    match args.command {
        TrustCommand::Score {
            agent_id,
            window_hours,
        } => {
            let agent = ctx
                .agents
                .get_by_agent_id(&agent_id, ctx.config.tenant_id)
                .await?
                .with_context(|| format!("Agent '{agent_id}' not found"))?;

            let now = Utc::now();
            let since = window_hours.map(|hours| now - Duration::hours(hours));
            let interactions = ctx
                .interactions
                .list_for_agent(agent.id, ctx.config.tenant_id, since)
                .await?;
            let score = ctx.calculator().calculate(&interactions, now);

            if json {
                println!("{}", serde_json::to_string_pretty(&score)?);
            } else {
                println!("Trust score for {} ({}):", agent.name, agent.agent_id);
                println!("  Overall: {:.3}", score.overall_score);
                println!("  Confidence: {:.3}", score.confidence);
                println!("  Interactions analyzed: {}", score.interactions_analyzed);
                if !score.breakdown.is_empty() {
                    println!("\n{}", format_breakdown_table(&score.breakdown));
                }
                if !score.factors.is_empty() {
                    println!("\nContributing factors:");
                    for factor in &score.factors {
                        println!("  - {factor}");
                    }
                }
                if !score.anomalies.is_empty() {
                    println!("\nAnomalies:");
                    for anomaly in &score.anomalies {
                        println!(
                            "  - {}: {:.2} -> {:.2} (delta {:+.2})",
                            anomaly.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
                            anomaly.previous_risk_score,
                            anomaly.risk_score,
                            anomaly.delta
                        );
                    }
                }
            }
        }
        TrustCommand::History { agent_id, days } => {
            let history = ctx.analytics().history(&agent_id, days).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&history)?);
            } else {
                println!("{}", format_history_table(&history));
            }
        }
        TrustCommand::Analytics { agent_id, days } => {
            let analytics = ctx.analytics().analytics(&agent_id, days).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&analytics)?);
            } else {
                match analytics {
                    None => println!("No interactions in the last {days} day(s)."),
                    Some(stats) => {
                        println!("Trust analytics for {agent_id} over {days} day(s):");
                        println!("  Mean: {:.3}", stats.mean);
                        println!("  Min: {:.3}", stats.min);
                        println!("  Max: {:.3}", stats.max);
                        println!("  Stddev: {:.3}", stats.stddev);
                        println!("  Interactions: {}", stats.count);
                        println!("  Score anomalies: {}", stats.anomaly_count);
                    }
                }
            }
        }
        TrustCommand::Summary { days } => {
            let summary = ctx.analytics().tenant_summary(days).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                match summary {
                    None => println!("No agent activity in the last {days} day(s)."),
                    Some(stats) => {
                        println!("Tenant trust summary over {days} day(s):");
                        println!("  Mean: {:.3}", stats.mean);
                        println!("  Min: {:.3}", stats.min);
                        println!("  Max: {:.3}", stats.max);
                        println!("  Stddev: {:.3}", stats.stddev);
                        println!("  Agents with activity: {}", stats.count);
                    }
                }
            }
        }
    }

    Ok(())
}
