use crate::domain::errors::DomainResult;
use crate::domain::models::{ApprovalStatus, Interaction};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Repository port for interaction persistence operations.
///
/// `list_for_agent` returns records in ascending timestamp order so
/// downstream anomaly detection over adjacent pairs is meaningful.
#[async_trait]
pub trait InteractionRepository: Send + Sync {
    /// Insert a new interaction record
    async fn insert(&self, interaction: &Interaction) -> DomainResult<()>;

    /// Point lookup scoped to an agent and tenant
    async fn get(
        &self,
        id: Uuid,
        agent_id: Uuid,
        tenant_id: i64,
    ) -> DomainResult<Option<Interaction>>;

    /// List an agent's interactions ascending by timestamp,
    /// optionally restricted to those at or after `since`
    async fn list_for_agent(
        &self,
        agent_id: Uuid,
        tenant_id: i64,
        since: Option<DateTime<Utc>>,
    ) -> DomainResult<Vec<Interaction>>;

    /// List all interactions pending approval for a tenant
    async fn list_pending(&self, tenant_id: i64) -> DomainResult<Vec<Interaction>>;

    /// Update the approval fields of one interaction in a single
    /// statement. This is the sole mutation point for approval state.
    async fn update_approval(
        &self,
        id: Uuid,
        status: ApprovalStatus,
        approved_by: Option<&str>,
        approval_timestamp: Option<DateTime<Utc>>,
    ) -> DomainResult<()>;
}
