//! Interaction domain model.
//!
//! Interactions are immutable telemetry records of one exchange
//! attributable to an agent, carrying the risk, behavior, and
//! detection signals the trust engine reads. The only mutable part
//! is the approval state, written exactly once by the workflow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Approval state of an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Never entered the approval workflow
    None,
    /// Awaiting a human/automation decision
    Pending,
    /// Resolved as approved
    Approved,
    /// Resolved as rejected
    Rejected,
}

impl Default for ApprovalStatus {
    fn default() -> Self {
        Self::None
    }
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(Self::None),
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Check if this is a resolved (terminal) state.
    ///
    /// Terminal by convention only: re-resolution overwrites
    /// (last write wins).
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

/// One recorded exchange attributable to an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Unique identifier
    pub id: Uuid,
    /// Owning agent (internal id)
    pub agent_id: Uuid,
    /// Owning tenant
    pub tenant_id: i64,
    /// When the interaction occurred
    pub timestamp: DateTime<Utc>,
    /// Prompt/input text, if captured
    pub input: Option<String>,
    /// Response text, if captured
    pub response: Option<String>,
    /// Upstream risk signal in [0,1]; absent upstream means 0.0
    pub risk_score: f64,
    /// Count of flagged behavior events
    pub behavior_flags: u32,
    /// Count of security-detection events
    pub detection_count: u32,
    /// Approval state, mutated only by the workflow
    pub approval_status: ApprovalStatus,
    /// Who resolved the approval, set on resolution
    pub approved_by: Option<String>,
    /// When the approval was resolved
    pub approval_timestamp: Option<DateTime<Utc>>,
}

impl Interaction {
    /// Create a new interaction timestamped now, with default signals.
    pub fn new(agent_id: Uuid, tenant_id: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            agent_id,
            tenant_id,
            timestamp: Utc::now(),
            input: None,
            response: None,
            risk_score: 0.0,
            behavior_flags: 0,
            detection_count: 0,
            approval_status: ApprovalStatus::default(),
            approved_by: None,
            approval_timestamp: None,
        }
    }

    /// Set the risk score, clamped to [0,1].
    pub fn with_risk_score(mut self, risk_score: f64) -> Self {
        self.risk_score = risk_score.clamp(0.0, 1.0);
        self
    }

    /// Set the behavior flag count.
    pub fn with_behavior_flags(mut self, flags: u32) -> Self {
        self.behavior_flags = flags;
        self
    }

    /// Set the detection count.
    pub fn with_detection_count(mut self, count: u32) -> Self {
        self.detection_count = count;
        self
    }

    /// Set the input text.
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Set the response text.
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = Some(response.into());
        self
    }

    /// Set the occurrence timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approval_status_round_trip() {
        for status in [
            ApprovalStatus::None,
            ApprovalStatus::Pending,
            ApprovalStatus::Approved,
            ApprovalStatus::Rejected,
        ] {
            assert_eq!(ApprovalStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(ApprovalStatus::from_str("bogus"), None);
    }

    #[test]
    fn test_resolved_states() {
        assert!(!ApprovalStatus::None.is_resolved());
        assert!(!ApprovalStatus::Pending.is_resolved());
        assert!(ApprovalStatus::Approved.is_resolved());
        assert!(ApprovalStatus::Rejected.is_resolved());
    }

    #[test]
    fn test_interaction_defaults() {
        let interaction = Interaction::new(Uuid::new_v4(), 1);
        assert_eq!(interaction.risk_score, 0.0);
        assert_eq!(interaction.behavior_flags, 0);
        assert_eq!(interaction.detection_count, 0);
        assert_eq!(interaction.approval_status, ApprovalStatus::None);
        assert!(interaction.approved_by.is_none());
    }

    #[test]
    fn test_risk_score_clamped() {
        let interaction = Interaction::new(Uuid::new_v4(), 1).with_risk_score(1.7);
        assert_eq!(interaction.risk_score, 1.0);
        let interaction = Interaction::new(Uuid::new_v4(), 1).with_risk_score(-0.3);
        assert_eq!(interaction.risk_score, 0.0);
    }
}
