//! SQLite implementation of the AgentRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Agent;
use crate::domain::ports::AgentRepository;

#[derive(Clone)]
pub struct SqliteAgentRepository {
    pool: SqlitePool,
}

impl SqliteAgentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AgentRepository for SqliteAgentRepository {
    async fn insert(&self, agent: &Agent) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO agents (id, agent_id, name, tenant_id, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(agent.id.to_string())
        .bind(&agent.agent_id)
        .bind(&agent.name)
        .bind(agent.tenant_id)
        .bind(agent.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<Agent>> {
        let row: Option<AgentRow> = sqlx::query_as("SELECT * FROM agents WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn get_by_agent_id(
        &self,
        agent_id: &str,
        tenant_id: i64,
    ) -> DomainResult<Option<Agent>> {
        let row: Option<AgentRow> =
            sqlx::query_as("SELECT * FROM agents WHERE agent_id = ? AND tenant_id = ?")
                .bind(agent_id)
                .bind(tenant_id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn list(&self, tenant_id: i64) -> DomainResult<Vec<Agent>> {
        let rows: Vec<AgentRow> =
            sqlx::query_as("SELECT * FROM agents WHERE tenant_id = ? ORDER BY created_at ASC")
                .bind(tenant_id)
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}

#[derive(sqlx::FromRow)]
struct AgentRow {
    id: String,
    agent_id: String,
    name: String,
    tenant_id: i64,
    created_at: String,
}

impl TryFrom<AgentRow> for Agent {
    type Error = DomainError;

    fn try_from(row: AgentRow) -> Result<Self, Self::Error> {
        Ok(Agent {
            id: Uuid::parse_str(&row.id)?,
            agent_id: row.agent_id,
            name: row.name,
            tenant_id: row.tenant_id,
            created_at: DateTime::parse_from_rfc3339(&row.created_at)?.with_timezone(&Utc),
        })
    }
}
