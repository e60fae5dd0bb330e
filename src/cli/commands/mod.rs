pub mod agent;
pub mod approval;
pub mod init;
pub mod record;
pub mod trust;

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::adapters::slack::{NullNotifier, SlackNotifier};
use crate::adapters::sqlite::{
    all_embedded_migrations, create_pool, verify_connection, Migrator, SqliteAgentRepository,
    SqliteInteractionRepository,
};
use crate::domain::models::Config;
use crate::domain::ports::{AgentRepository, InteractionRepository, Notifier};
use crate::infrastructure::config::ConfigLoader;
use crate::services::{TrustAnalyticsService, TrustScoreCalculator, ValidationWorkflow};

/// Wired services shared by the command handlers.
pub(crate) struct AppContext {
    pub config: Config,
    pub agents: Arc<dyn AgentRepository>,
    pub interactions: Arc<dyn InteractionRepository>,
}

impl AppContext {
    /// Load config, open the database, and run pending migrations.
    pub async fn init() -> Result<Self> {
        let config = ConfigLoader::load()?;
        let pool = create_pool(&config.database.path, None)
            .await
            .with_context(|| format!("Failed to open database at {}", config.database.path))?;
        verify_connection(&pool)
            .await
            .context("Database connection check failed")?;
        Migrator::new(pool.clone())
            .run_embedded_migrations(all_embedded_migrations())
            .await
            .context("Failed to run database migrations")?;

        Ok(Self {
            config,
            agents: Arc::new(SqliteAgentRepository::new(pool.clone())),
            interactions: Arc::new(SqliteInteractionRepository::new(pool)),
        })
    }

    pub fn calculator(&self) -> TrustScoreCalculator {
        TrustScoreCalculator::with_config(self.config.trust)
    }

    fn notifier(&self) -> Arc<dyn Notifier> {
        match SlackNotifier::from_config(&self.config.slack) {
            Some(slack) => Arc::new(slack),
            None => Arc::new(NullNotifier),
        }
    }

    pub fn workflow(&self) -> ValidationWorkflow {
        ValidationWorkflow::new(
            Arc::clone(&self.agents),
            Arc::clone(&self.interactions),
            self.notifier(),
            self.calculator(),
            self.config.workflow,
            self.config.tenant_id,
        )
    }

    pub fn analytics(&self) -> TrustAnalyticsService {
        TrustAnalyticsService::new(
            Arc::clone(&self.agents),
            Arc::clone(&self.interactions),
            self.calculator(),
            self.config.tenant_id,
        )
    }
}
