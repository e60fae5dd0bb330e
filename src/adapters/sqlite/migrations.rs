//! Embedded schema migrations.
//!
//! Migrations ship inside the binary and are tracked in a
//! `schema_migrations` table keyed by version. Re-running is a no-op
//! once every version is recorded.

use sqlx::SqlitePool;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Migration table setup failed: {0}")]
    Prepare(#[source] sqlx::Error),

    #[error("Schema version lookup failed: {0}")]
    VersionLookup(#[source] sqlx::Error),

    #[error("Migration {version} failed: {source}")]
    Apply {
        version: i64,
        #[source]
        source: sqlx::Error,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: i64,
    pub description: &'static str,
    pub sql: &'static str,
}

pub fn all_embedded_migrations() -> Vec<Migration> {
    vec![Migration {
        version: 1,
        description: "Initial schema",
        sql: include_str!("../../../migrations/001_initial_schema.sql"),
    }]
}

pub struct Migrator {
    pool: SqlitePool,
}

impl Migrator {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Apply every migration newer than the recorded schema version,
    /// returning how many were applied.
    pub async fn run_embedded_migrations(
        &self,
        migrations: Vec<Migration>,
    ) -> Result<usize, MigrationError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL DEFAULT (datetime('now')),
                description TEXT
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(MigrationError::Prepare)?;

        let current = self.current_version().await?;
        let mut applied = 0;
        for migration in migrations.into_iter().filter(|m| m.version > current) {
            self.apply(&migration).await?;
            applied += 1;
        }
        Ok(applied)
    }

    async fn current_version(&self) -> Result<i64, MigrationError> {
        let (version,): (i64,) =
            sqlx::query_as("SELECT COALESCE(MAX(version), 0) FROM schema_migrations")
                .fetch_one(&self.pool)
                .await
                .map_err(MigrationError::VersionLookup)?;
        Ok(version)
    }

    async fn apply(&self, migration: &Migration) -> Result<(), MigrationError> {
        let fail = |source| MigrationError::Apply {
            version: migration.version,
            source,
        };

        sqlx::raw_sql(migration.sql)
            .execute(&self.pool)
            .await
            .map_err(fail)?;
        sqlx::query("INSERT INTO schema_migrations (version, description) VALUES (?, ?)")
            .bind(migration.version)
            .bind(migration.description)
            .execute(&self.pool)
            .await
            .map_err(fail)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_test_pool;

    #[tokio::test]
    async fn test_rerun_is_a_noop() {
        let pool = create_test_pool().await.unwrap();
        let migrator = Migrator::new(pool);

        let first = migrator
            .run_embedded_migrations(all_embedded_migrations())
            .await
            .unwrap();
        assert_eq!(first, 1);

        let second = migrator
            .run_embedded_migrations(all_embedded_migrations())
            .await
            .unwrap();
        assert_eq!(second, 0);
    }
}
