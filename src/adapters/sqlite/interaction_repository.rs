//! SQLite implementation of the InteractionRepository.
//!
//! `update_approval` is a single UPDATE statement, which keeps the
//! read-modify-write of approval state atomic under concurrent
//! resolvers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{ApprovalStatus, Interaction};
use crate::domain::ports::InteractionRepository;

#[derive(Clone)]
pub struct SqliteInteractionRepository {
    pool: SqlitePool,
}

impl SqliteInteractionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InteractionRepository for SqliteInteractionRepository {
    async fn insert(&self, interaction: &Interaction) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO interactions (id, agent_id, tenant_id, timestamp, input, response,
             risk_score, behavior_flags, detection_count, approval_status, approved_by,
             approval_timestamp)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(interaction.id.to_string())
        .bind(interaction.agent_id.to_string())
        .bind(interaction.tenant_id)
        .bind(interaction.timestamp.to_rfc3339())
        .bind(&interaction.input)
        .bind(&interaction.response)
        .bind(interaction.risk_score)
        .bind(i64::from(interaction.behavior_flags))
        .bind(i64::from(interaction.detection_count))
        .bind(interaction.approval_status.as_str())
        .bind(&interaction.approved_by)
        .bind(interaction.approval_timestamp.map(|t| t.to_rfc3339()))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(
        &self,
        id: Uuid,
        agent_id: Uuid,
        tenant_id: i64,
    ) -> DomainResult<Option<Interaction>> {
        let row: Option<InteractionRow> = sqlx::query_as(
            "SELECT * FROM interactions WHERE id = ? AND agent_id = ? AND tenant_id = ?",
        )
        .bind(id.to_string())
        .bind(agent_id.to_string())
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn list_for_agent(
        &self,
        agent_id: Uuid,
        tenant_id: i64,
        since: Option<DateTime<Utc>>,
    ) -> DomainResult<Vec<Interaction>> {
        let rows: Vec<InteractionRow> = if let Some(since) = since {
            sqlx::query_as(
                "SELECT * FROM interactions
                 WHERE agent_id = ? AND tenant_id = ? AND timestamp >= ?
                 ORDER BY timestamp ASC",
            )
            .bind(agent_id.to_string())
            .bind(tenant_id)
            .bind(since.to_rfc3339())
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as(
                "SELECT * FROM interactions
                 WHERE agent_id = ? AND tenant_id = ?
                 ORDER BY timestamp ASC",
            )
            .bind(agent_id.to_string())
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await?
        };

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn list_pending(&self, tenant_id: i64) -> DomainResult<Vec<Interaction>> {
        let rows: Vec<InteractionRow> = sqlx::query_as(
            "SELECT * FROM interactions
             WHERE tenant_id = ? AND approval_status = 'pending'
             ORDER BY timestamp ASC",
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn update_approval(
        &self,
        id: Uuid,
        status: ApprovalStatus,
        approved_by: Option<&str>,
        approval_timestamp: Option<DateTime<Utc>>,
    ) -> DomainResult<()> {
        let result = sqlx::query(
            "UPDATE interactions
             SET approval_status = ?, approved_by = ?, approval_timestamp = ?
             WHERE id = ?",
        )
        .bind(status.as_str())
        .bind(approved_by)
        .bind(approval_timestamp.map(|t| t.to_rfc3339()))
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::InteractionNotFound(id));
        }

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct InteractionRow {
    id: String,
    agent_id: String,
    tenant_id: i64,
    timestamp: String,
    input: Option<String>,
    response: Option<String>,
    risk_score: f64,
    behavior_flags: i64,
    detection_count: i64,
    approval_status: String,
    approved_by: Option<String>,
    approval_timestamp: Option<String>,
}

impl TryFrom<InteractionRow> for Interaction {
    type Error = DomainError;

    fn try_from(row: InteractionRow) -> Result<Self, Self::Error> {
        let approval_status = ApprovalStatus::from_str(&row.approval_status)
            .ok_or(DomainError::InvalidApprovalStatus(row.approval_status))?;

        Ok(Interaction {
            id: Uuid::parse_str(&row.id)?,
            agent_id: Uuid::parse_str(&row.agent_id)?,
            tenant_id: row.tenant_id,
            timestamp: DateTime::parse_from_rfc3339(&row.timestamp)?.with_timezone(&Utc),
            input: row.input,
            response: row.response,
            risk_score: row.risk_score,
            behavior_flags: u32::try_from(row.behavior_flags)
                .map_err(|_| DomainError::InvalidCount(row.behavior_flags))?,
            detection_count: u32::try_from(row.detection_count)
                .map_err(|_| DomainError::InvalidCount(row.detection_count))?,
            approval_status,
            approved_by: row.approved_by,
            approval_timestamp: row
                .approval_timestamp
                .map(|t| DateTime::parse_from_rfc3339(&t).map(|dt| dt.with_timezone(&Utc)))
                .transpose()?,
        })
    }
}
