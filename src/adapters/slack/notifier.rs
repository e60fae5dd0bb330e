//! Slack incoming-webhook notifier.
//!
//! Builds Block Kit payloads for trust score alerts and approval
//! resolutions. Delivery is best-effort: every transport or HTTP
//! error is caught, logged, and reported as `false` so the workflow
//! never blocks on Slack. The request timeout bounds how long a dead
//! webhook can delay a caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::domain::models::{Agent, Interaction, SlackConfig, TrustScoreResult};
use crate::domain::ports::Notifier;

const COLOR_INFO: &str = "#36a64f";
const COLOR_WARNING: &str = "#ffcc00";
const COLOR_DANGER: &str = "#ff0000";

/// Maximum characters of interaction input/response included in a message.
const PREVIEW_LEN: usize = 100;

/// Notifier that posts to a Slack incoming webhook.
#[derive(Debug, Clone)]
pub struct SlackNotifier {
    http: Client,
    webhook_url: String,
}

impl SlackNotifier {
    /// Create a notifier from configuration.
    ///
    /// Returns `None` when no webhook URL is configured; callers fall
    /// back to [`NullNotifier`].
    pub fn from_config(config: &SlackConfig) -> Option<Self> {
        if config.webhook_url.is_empty() {
            return None;
        }
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .ok()?;
        Some(Self {
            http,
            webhook_url: config.webhook_url.clone(),
        })
    }

    async fn post(&self, payload: &Value) -> bool {
        match self.http.post(&self.webhook_url).json(payload).send().await {
            Ok(response) => match response.error_for_status() {
                Ok(_) => true,
                Err(err) => {
                    tracing::warn!(error = %err, "Slack webhook returned error status");
                    false
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "Slack webhook request failed");
                false
            }
        }
    }
}

fn preview(text: &str) -> String {
    let truncated: String = text.chars().take(PREVIEW_LEN).collect();
    format!("{truncated}...")
}

fn interaction_section(interaction: &Interaction, heading: &str) -> Value {
    let input = interaction.input.as_deref().unwrap_or("");
    let response = interaction.response.as_deref().unwrap_or("");
    json!({
        "type": "section",
        "text": {
            "type": "mrkdwn",
            "text": format!(
                "*{heading}:*\n• Input: {}\n• Response: {}",
                preview(input),
                preview(response)
            )
        }
    })
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn send_score_alert(
        &self,
        agent: &Agent,
        score: &TrustScoreResult,
        interaction: Option<&Interaction>,
    ) -> bool {
        let color = if score.overall_score < 0.4 {
            COLOR_DANGER
        } else if score.overall_score < 0.7 {
            COLOR_WARNING
        } else {
            COLOR_INFO
        };

        let mut blocks = vec![
            json!({
                "type": "header",
                "text": {
                    "type": "plain_text",
                    "text": format!("🔔 Trust Score Alert: {} ({})", agent.name, agent.agent_id)
                }
            }),
            json!({
                "type": "section",
                "fields": [
                    {
                        "type": "mrkdwn",
                        "text": format!("*Trust Score:*\n{:.2}", score.overall_score)
                    },
                    {
                        "type": "mrkdwn",
                        "text": format!("*Confidence:*\n{:.2}", score.confidence)
                    }
                ]
            }),
        ];

        if !score.breakdown.is_empty() {
            let breakdown_text = score
                .breakdown
                .iter()
                .map(|(name, value)| format!("• {name}: {value:.2}"))
                .collect::<Vec<_>>()
                .join("\n");
            blocks.push(json!({
                "type": "section",
                "text": {
                    "type": "mrkdwn",
                    "text": format!("*Score Breakdown:*\n{breakdown_text}")
                }
            }));
        }

        if !score.factors.is_empty() {
            let factors_text = score
                .factors
                .iter()
                .map(|factor| format!("• {factor}"))
                .collect::<Vec<_>>()
                .join("\n");
            blocks.push(json!({
                "type": "section",
                "text": {
                    "type": "mrkdwn",
                    "text": format!("*Contributing Factors:*\n{factors_text}")
                }
            }));
        }

        if let Some(interaction) = interaction {
            blocks.push(interaction_section(interaction, "Latest Interaction"));
        }

        if score.overall_score < 0.7 {
            let interaction_ref = interaction
                .map_or_else(|| "none".to_string(), |i| i.id.to_string());
            blocks.push(json!({
                "type": "actions",
                "elements": [
                    {
                        "type": "button",
                        "text": { "type": "plain_text", "text": "Approve", "emoji": true },
                        "style": "primary",
                        "value": format!("approve_{}_{}", agent.id, interaction_ref)
                    },
                    {
                        "type": "button",
                        "text": { "type": "plain_text", "text": "Reject", "emoji": true },
                        "style": "danger",
                        "value": format!("reject_{}_{}", agent.id, interaction_ref)
                    }
                ]
            }));
        }

        let payload = json!({
            "blocks": blocks,
            "attachments": [{ "color": color }]
        });

        self.post(&payload).await
    }

    async fn send_resolution(
        &self,
        agent: &Agent,
        interaction: Option<&Interaction>,
        approved: bool,
        approver: &str,
    ) -> bool {
        let (status, color) = if approved {
            ("Approved ✅", COLOR_INFO)
        } else {
            ("Rejected ❌", COLOR_DANGER)
        };

        let mut blocks = vec![
            json!({
                "type": "header",
                "text": {
                    "type": "plain_text",
                    "text": format!("Action {status}: {} ({})", agent.name, agent.agent_id)
                }
            }),
            json!({
                "type": "section",
                "fields": [
                    {
                        "type": "mrkdwn",
                        "text": format!("*Approver:*\n{approver}")
                    },
                    {
                        "type": "mrkdwn",
                        "text": format!("*Time:*\n{}", chrono::Utc::now().to_rfc3339())
                    }
                ]
            }),
        ];

        if let Some(interaction) = interaction {
            blocks.push(interaction_section(interaction, "Interaction Details"));
        }

        let payload = json!({
            "blocks": blocks,
            "attachments": [{ "color": color }]
        });

        self.post(&payload).await
    }
}

/// Notifier that silently succeeds without sending anything.
///
/// Used when no webhook is configured so the workflow keeps working
/// end to end.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn send_score_alert(
        &self,
        agent: &Agent,
        score: &TrustScoreResult,
        _interaction: Option<&Interaction>,
    ) -> bool {
        tracing::debug!(
            agent_id = %agent.agent_id,
            score = score.overall_score,
            "no notifier configured, dropping score alert"
        );
        true
    }

    async fn send_resolution(
        &self,
        agent: &Agent,
        _interaction: Option<&Interaction>,
        approved: bool,
        approver: &str,
    ) -> bool {
        tracing::debug!(
            agent_id = %agent.agent_id,
            approved,
            approver,
            "no notifier configured, dropping resolution notice"
        );
        true
    }
}
