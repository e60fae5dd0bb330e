//! Agent domain model.
//!
//! An agent is the autonomous software entity whose interaction
//! telemetry is scored and whose risky actions are gated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An autonomous agent registered with a tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Internal unique identifier
    pub id: Uuid,
    /// Caller-facing identifier (stable across re-registration)
    pub agent_id: String,
    /// Human-readable name
    pub name: String,
    /// Owning tenant
    pub tenant_id: i64,
    /// When registered
    pub created_at: DateTime<Utc>,
}

impl Agent {
    /// Create a new agent for a tenant.
    pub fn new(agent_id: impl Into<String>, name: impl Into<String>, tenant_id: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            agent_id: agent_id.into(),
            name: name.into(),
            tenant_id,
            created_at: Utc::now(),
        }
    }
}
