//! Common test utilities for integration tests
//!
//! Provides shared fixtures, in-memory port implementations, and
//! database helpers used across multiple integration test files.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use trustgate::adapters::sqlite::{all_embedded_migrations, create_test_pool, Migrator};
use trustgate::domain::models::{Agent, ApprovalStatus, Interaction, TrustScoreResult};
use trustgate::domain::ports::{AgentRepository, InteractionRepository, Notifier};
use trustgate::domain::DomainResult;

/// Create an in-memory database with the schema applied.
#[allow(dead_code)]
pub async fn setup_test_db() -> SqlitePool {
    let pool = create_test_pool().await.expect("Failed to create test pool");
    Migrator::new(pool.clone())
        .run_embedded_migrations(all_embedded_migrations())
        .await
        .expect("Failed to run migrations");
    pool
}

/// Build an interaction `days_ago` days in the past with the given risk.
#[allow(dead_code)]
pub fn interaction_days_ago(agent_id: Uuid, tenant_id: i64, days_ago: i64, risk: f64) -> Interaction {
    Interaction::new(agent_id, tenant_id)
        .with_timestamp(Utc::now() - Duration::days(days_ago))
        .with_risk_score(risk)
}

/// In-memory agent repository for workflow tests.
#[allow(dead_code)]
#[derive(Default)]
pub struct InMemoryAgentRepository {
    agents: Mutex<Vec<Agent>>,
}

#[allow(dead_code)]
impl InMemoryAgentRepository {
    pub fn with_agents(agents: Vec<Agent>) -> Self {
        Self {
            agents: Mutex::new(agents),
        }
    }
}

#[async_trait]
impl AgentRepository for InMemoryAgentRepository {
    async fn insert(&self, agent: &Agent) -> DomainResult<()> {
        self.agents.lock().unwrap().push(agent.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<Agent>> {
        Ok(self
            .agents
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn get_by_agent_id(
        &self,
        agent_id: &str,
        tenant_id: i64,
    ) -> DomainResult<Option<Agent>> {
        Ok(self
            .agents
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.agent_id == agent_id && a.tenant_id == tenant_id)
            .cloned())
    }

    async fn list(&self, tenant_id: i64) -> DomainResult<Vec<Agent>> {
        Ok(self
            .agents
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.tenant_id == tenant_id)
            .cloned()
            .collect())
    }
}

/// In-memory interaction repository for workflow tests.
#[allow(dead_code)]
#[derive(Default)]
pub struct InMemoryInteractionRepository {
    interactions: Mutex<HashMap<Uuid, Interaction>>,
}

#[allow(dead_code)]
impl InMemoryInteractionRepository {
    pub fn with_interactions(interactions: Vec<Interaction>) -> Self {
        Self {
            interactions: Mutex::new(interactions.into_iter().map(|i| (i.id, i)).collect()),
        }
    }

    pub fn get_status(&self, id: Uuid) -> Option<ApprovalStatus> {
        self.interactions
            .lock()
            .unwrap()
            .get(&id)
            .map(|i| i.approval_status)
    }

    pub fn get_approver(&self, id: Uuid) -> Option<String> {
        self.interactions
            .lock()
            .unwrap()
            .get(&id)
            .and_then(|i| i.approved_by.clone())
    }
}

#[async_trait]
impl InteractionRepository for InMemoryInteractionRepository {
    async fn insert(&self, interaction: &Interaction) -> DomainResult<()> {
        self.interactions
            .lock()
            .unwrap()
            .insert(interaction.id, interaction.clone());
        Ok(())
    }

    async fn get(
        &self,
        id: Uuid,
        agent_id: Uuid,
        tenant_id: i64,
    ) -> DomainResult<Option<Interaction>> {
        Ok(self
            .interactions
            .lock()
            .unwrap()
            .get(&id)
            .filter(|i| i.agent_id == agent_id && i.tenant_id == tenant_id)
            .cloned())
    }

    async fn list_for_agent(
        &self,
        agent_id: Uuid,
        tenant_id: i64,
        since: Option<DateTime<Utc>>,
    ) -> DomainResult<Vec<Interaction>> {
        let mut records: Vec<_> = self
            .interactions
            .lock()
            .unwrap()
            .values()
            .filter(|i| i.agent_id == agent_id && i.tenant_id == tenant_id)
            .filter(|i| since.is_none_or(|s| i.timestamp >= s))
            .cloned()
            .collect();
        records.sort_by_key(|i| i.timestamp);
        Ok(records)
    }

    async fn list_pending(&self, tenant_id: i64) -> DomainResult<Vec<Interaction>> {
        let mut records: Vec<_> = self
            .interactions
            .lock()
            .unwrap()
            .values()
            .filter(|i| i.tenant_id == tenant_id && i.approval_status == ApprovalStatus::Pending)
            .cloned()
            .collect();
        records.sort_by_key(|i| i.timestamp);
        Ok(records)
    }

    async fn update_approval(
        &self,
        id: Uuid,
        status: ApprovalStatus,
        approved_by: Option<&str>,
        approval_timestamp: Option<DateTime<Utc>>,
    ) -> DomainResult<()> {
        let mut interactions = self.interactions.lock().unwrap();
        let interaction = interactions
            .get_mut(&id)
            .ok_or(trustgate::DomainError::InteractionNotFound(id))?;
        interaction.approval_status = status;
        interaction.approved_by = approved_by.map(String::from);
        interaction.approval_timestamp = approval_timestamp;
        Ok(())
    }
}

/// Notifier that counts dispatches and returns a fixed result.
#[allow(dead_code)]
pub struct CountingNotifier {
    pub deliver: bool,
    pub alerts: AtomicUsize,
    pub resolutions: AtomicUsize,
}

#[allow(dead_code)]
impl CountingNotifier {
    pub fn new() -> Self {
        Self {
            deliver: true,
            alerts: AtomicUsize::new(0),
            resolutions: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            deliver: false,
            alerts: AtomicUsize::new(0),
            resolutions: AtomicUsize::new(0),
        }
    }

    pub fn alert_count(&self) -> usize {
        self.alerts.load(Ordering::SeqCst)
    }

    pub fn resolution_count(&self) -> usize {
        self.resolutions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for CountingNotifier {
    async fn send_score_alert(
        &self,
        _agent: &Agent,
        _score: &TrustScoreResult,
        _interaction: Option<&Interaction>,
    ) -> bool {
        self.alerts.fetch_add(1, Ordering::SeqCst);
        self.deliver
    }

    async fn send_resolution(
        &self,
        _agent: &Agent,
        _interaction: Option<&Interaction>,
        _approved: bool,
        _approver: &str,
    ) -> bool {
        self.resolutions.fetch_add(1, Ordering::SeqCst);
        self.deliver
    }
}
