use anyhow::{Context, Result};
use clap::Args;

use crate::adapters::sqlite::{all_embedded_migrations, create_pool, Migrator};
use crate::infrastructure::config::ConfigLoader;

const CONFIG_TEMPLATE: &str = "\
# Trustgate configuration. Environment variables with the TRUSTGATE_
# prefix override any value here (e.g. TRUSTGATE_WORKFLOW__TRUST_THRESHOLD).
tenant_id: 1

database:
  path: .trustgate/trustgate.db

logging:
  level: info
  format: pretty

trust:
  # Weights are a weighted sum, not an average; they need not sum to 1.
  weights:
    risk: 0.4
    consistency: 0.2
    behavior: 0.2
    detection: 0.2
  time_decay_half_life_days: 7.0
  anomaly_threshold: 0.5

workflow:
  trust_threshold: 0.7

slack:
  # Leave empty to disable notifications.
  webhook_url: \"\"
  timeout_secs: 10
";

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

pub async fn execute(args: InitArgs, json: bool) -> Result<()> {
    let config_path = std::path::Path::new(".trustgate/config.yaml");
    if config_path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    std::fs::create_dir_all(".trustgate").context("Failed to create .trustgate directory")?;
    std::fs::write(config_path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    let config = ConfigLoader::load()?;
    let pool = create_pool(&config.database.path, None)
        .await
        .with_context(|| format!("Failed to create database at {}", config.database.path))?;
    let applied = Migrator::new(pool)
        .run_embedded_migrations(all_embedded_migrations())
        .await
        .context("Failed to run database migrations")?;

    if json {
        let output = serde_json::json!({
            "config": config_path.display().to_string(),
            "database": config.database.path,
            "migrations_applied": applied,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Initialized trustgate project:");
        println!("  Config: {}", config_path.display());
        println!("  Database: {}", config.database.path);
        println!("  Migrations applied: {applied}");
    }

    Ok(())
}
