//! Trust score and approval decision value objects.
//!
//! A [`TrustScoreResult`] is produced fresh on every engine call and
//! never persisted; the score shown in a pending listing is therefore
//! the current evaluation, not the one that triggered the gate.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sudden jump in per-interaction risk exceeding the configured
/// threshold, attributed to the later of the two records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    /// Timestamp of the later record of the pair
    pub timestamp: DateTime<Utc>,
    /// Risk score of the later record
    pub risk_score: f64,
    /// Risk score of the earlier record
    pub previous_risk_score: f64,
    /// Signed difference, later minus earlier
    pub delta: f64,
}

/// Composite trust evaluation for one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustScoreResult {
    /// Weighted composite score, clamped to [0,1]
    pub overall_score: f64,
    /// Evidence quantity/recency measure in [0,1], independent of the score
    pub confidence: f64,
    /// Per-factor scores, empty iff no interactions were considered
    pub breakdown: BTreeMap<String, f64>,
    /// Ordered human-readable explanation notes, one or more per
    /// flagged record, never deduplicated
    pub factors: Vec<String>,
    /// Risk jumps between adjacent records
    pub anomalies: Vec<Anomaly>,
    /// Number of records used
    pub interactions_analyzed: usize,
}

impl TrustScoreResult {
    /// The zero-evidence result: unconfident full trust.
    ///
    /// Callers must gate on `confidence`; a 1.0 score with 0.0
    /// confidence carries no information.
    pub fn no_evidence() -> Self {
        Self {
            overall_score: 1.0,
            confidence: 0.0,
            breakdown: BTreeMap::new(),
            factors: Vec::new(),
            anomalies: Vec::new(),
            interactions_analyzed: 0,
        }
    }
}

/// Outcome of validating one interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    /// Automatically approved on trust score
    Approved,
    /// Gated; awaiting manual approval
    PendingApproval,
}

impl DecisionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::PendingApproval => "pending_approval",
        }
    }
}

/// Decision produced by the validation workflow for one interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalDecision {
    /// Auto-approved or gated
    pub status: DecisionStatus,
    /// The score that produced this decision
    pub trust_score: TrustScoreResult,
    /// Whether manual approval is required
    pub requires_approval: bool,
    /// Human-readable reason
    pub message: String,
}

/// Result of resolving an approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalResolution {
    /// Final state, approved or rejected
    pub status: crate::domain::models::interaction::ApprovalStatus,
    /// Caller-facing agent identifier
    pub agent_id: String,
    /// Interaction resolved, if one was supplied
    pub interaction_id: Option<Uuid>,
    /// Who resolved it
    pub approver: String,
    /// When it was resolved
    pub timestamp: DateTime<Utc>,
}

/// One entry in the pending-approvals listing.
///
/// The trust score here is recomputed from the agent's current full
/// history at listing time and can diverge from the score that put
/// the interaction into pending state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingApproval {
    /// Caller-facing agent identifier
    pub agent_id: String,
    /// Agent display name
    pub agent_name: String,
    /// The pending interaction
    pub interaction_id: Uuid,
    /// When the interaction occurred
    pub timestamp: DateTime<Utc>,
    /// Input preview, if captured
    pub input: Option<String>,
    /// Response preview, if captured
    pub response: Option<String>,
    /// Current full-history trust evaluation
    pub trust_score: TrustScoreResult,
}
