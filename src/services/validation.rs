//! Validation and approval workflow.
//!
//! Consumes a fresh trust score and turns it into an auto-approve or
//! pending-approval decision, then tracks that decision to resolution.
//! Notification dispatch is fire-and-forget: a failed delivery is
//! logged and swallowed, never surfaced to the caller.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    Agent, ApprovalDecision, ApprovalResolution, ApprovalStatus, DecisionStatus, Interaction,
    PendingApproval, WorkflowConfig,
};
use crate::domain::ports::{AgentRepository, InteractionRepository, Notifier};
use crate::services::trust_calculator::TrustScoreCalculator;

/// Human-in-the-loop approval workflow for one tenant.
pub struct ValidationWorkflow {
    agents: Arc<dyn AgentRepository>,
    interactions: Arc<dyn InteractionRepository>,
    notifier: Arc<dyn Notifier>,
    calculator: TrustScoreCalculator,
    config: WorkflowConfig,
    tenant_id: i64,
}

impl ValidationWorkflow {
    pub fn new(
        agents: Arc<dyn AgentRepository>,
        interactions: Arc<dyn InteractionRepository>,
        notifier: Arc<dyn Notifier>,
        calculator: TrustScoreCalculator,
        config: WorkflowConfig,
        tenant_id: i64,
    ) -> Self {
        Self {
            agents,
            interactions,
            notifier,
            calculator,
            config,
            tenant_id,
        }
    }

    /// Decide whether an agent's interaction may proceed.
    ///
    /// Always recomputes the trust score from the agent's full
    /// unwindowed history; a caller-supplied score is never reused.
    /// When approval is required, dispatches one alert notification.
    /// No store mutation happens here.
    pub async fn validate_interaction(
        &self,
        agent: &Agent,
        interaction: Option<&Interaction>,
        force_approval: bool,
    ) -> DomainResult<ApprovalDecision> {
        let history = self
            .interactions
            .list_for_agent(agent.id, self.tenant_id, None)
            .await?;
        let trust_score = self.calculator.calculate(&history, Utc::now());

        let requires_approval =
            force_approval || trust_score.overall_score < self.config.trust_threshold;

        if requires_approval {
            tracing::info!(
                agent_id = %agent.agent_id,
                score = trust_score.overall_score,
                confidence = trust_score.confidence,
                forced = force_approval,
                "interaction gated, requesting manual approval"
            );
            let delivered = self
                .notifier
                .send_score_alert(agent, &trust_score, interaction)
                .await;
            if !delivered {
                tracing::warn!(agent_id = %agent.agent_id, "score alert delivery failed");
            }

            Ok(ApprovalDecision {
                status: DecisionStatus::PendingApproval,
                trust_score,
                requires_approval: true,
                message: "Manual approval required due to low trust score".to_string(),
            })
        } else {
            Ok(ApprovalDecision {
                status: DecisionStatus::Approved,
                trust_score,
                requires_approval: false,
                message: "Automatically approved based on trust score".to_string(),
            })
        }
    }

    /// Resolve an approval for an agent, optionally targeting one
    /// interaction.
    ///
    /// The interaction update is a single statement, the sole
    /// mutation point for approval state. Re-resolution overwrites
    /// the prior decision (last write wins).
    pub async fn handle_approval(
        &self,
        agent_id: &str,
        interaction_id: Option<Uuid>,
        approved: bool,
        approver: &str,
    ) -> DomainResult<ApprovalResolution> {
        let agent = self
            .agents
            .get_by_agent_id(agent_id, self.tenant_id)
            .await?
            .ok_or_else(|| DomainError::AgentNotFound(agent_id.to_string()))?;

        let interaction = match interaction_id {
            Some(id) => self.interactions.get(id, agent.id, self.tenant_id).await?,
            None => None,
        };

        let delivered = self
            .notifier
            .send_resolution(&agent, interaction.as_ref(), approved, approver)
            .await;
        if !delivered {
            tracing::warn!(agent_id = %agent.agent_id, "resolution notification delivery failed");
        }

        let status = if approved {
            ApprovalStatus::Approved
        } else {
            ApprovalStatus::Rejected
        };
        let timestamp = Utc::now();

        if let Some(interaction) = &interaction {
            self.interactions
                .update_approval(interaction.id, status, Some(approver), Some(timestamp))
                .await?;
            tracing::info!(
                agent_id = %agent.agent_id,
                interaction_id = %interaction.id,
                status = status.as_str(),
                approver,
                "approval resolved"
            );
        }

        Ok(ApprovalResolution {
            status,
            agent_id: agent.agent_id,
            interaction_id: interaction.map(|i| i.id),
            approver: approver.to_string(),
            timestamp,
        })
    }

    /// List interactions awaiting approval in this tenant.
    ///
    /// Each entry carries a trust score recomputed from the agent's
    /// current full history, which can diverge from the score that
    /// gated the interaction. Orphaned records whose agent no longer
    /// exists are skipped.
    pub async fn list_pending_approvals(&self) -> DomainResult<Vec<PendingApproval>> {
        let pending = self.interactions.list_pending(self.tenant_id).await?;

        let mut result = Vec::with_capacity(pending.len());
        for interaction in pending {
            let Some(agent) = self.agents.get(interaction.agent_id).await? else {
                tracing::warn!(
                    interaction_id = %interaction.id,
                    "skipping pending interaction with missing agent"
                );
                continue;
            };

            let history = self
                .interactions
                .list_for_agent(agent.id, self.tenant_id, None)
                .await?;
            let trust_score = self.calculator.calculate(&history, Utc::now());

            result.push(PendingApproval {
                agent_id: agent.agent_id,
                agent_name: agent.name,
                interaction_id: interaction.id,
                timestamp: interaction.timestamp,
                input: interaction.input,
                response: interaction.response,
                trust_score,
            });
        }

        Ok(result)
    }

    /// Mark an interaction pending in the store.
    ///
    /// Called by outer adapters after a gated decision so pending
    /// listings reflect it; the decision path itself stays free of
    /// store writes.
    pub async fn mark_pending(&self, interaction_id: Uuid) -> DomainResult<()> {
        self.interactions
            .update_approval(interaction_id, ApprovalStatus::Pending, None, None)
            .await
    }
}
