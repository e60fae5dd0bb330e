use crate::domain::errors::DomainResult;
use crate::domain::models::Agent;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository port for agent persistence operations
#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// Insert a new agent
    async fn insert(&self, agent: &Agent) -> DomainResult<()>;

    /// Get an agent by internal id
    async fn get(&self, id: Uuid) -> DomainResult<Option<Agent>>;

    /// Get an agent by caller-facing id within a tenant
    async fn get_by_agent_id(&self, agent_id: &str, tenant_id: i64)
        -> DomainResult<Option<Agent>>;

    /// List all agents for a tenant
    async fn list(&self, tenant_id: i64) -> DomainResult<Vec<Agent>>;
}
