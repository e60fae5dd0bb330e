use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid weight for factor '{factor}': {value}. Weights must be non-negative")]
    NegativeWeight { factor: &'static str, value: f64 },

    #[error("Invalid time_decay_half_life_days: {0}. Must be positive")]
    InvalidHalfLife(f64),

    #[error("Invalid anomaly_threshold: {0}. Must be in [0, 1]")]
    InvalidAnomalyThreshold(f64),

    #[error("Invalid trust_threshold: {0}. Must be in [0, 1]")]
    InvalidTrustThreshold(f64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Database path cannot be empty")]
    EmptyDatabasePath,

    #[error("Invalid max_connections: {0}. Must be at least 1")]
    InvalidMaxConnections(u32),

    #[error("Invalid slack timeout: {0}s. Must be at least 1")]
    InvalidSlackTimeout(u64),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .trustgate/config.yaml (project config, created by init)
    /// 3. .trustgate/local.yaml (project local overrides, optional)
    /// 4. Environment variables (TRUSTGATE_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".trustgate/config.yaml"))
            .merge(Yaml::file(".trustgate/local.yaml"))
            .merge(Env::prefixed("TRUSTGATE_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    ///
    /// Weights are checked for sign only. They are a scale parameter,
    /// not required to sum to 1, and are never normalized.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let weights = config.trust.weights;
        for (factor, value) in [
            ("risk", weights.risk),
            ("consistency", weights.consistency),
            ("behavior", weights.behavior),
            ("detection", weights.detection),
        ] {
            if value < 0.0 {
                return Err(ConfigError::NegativeWeight { factor, value });
            }
        }

        if config.trust.time_decay_half_life_days <= 0.0 {
            return Err(ConfigError::InvalidHalfLife(
                config.trust.time_decay_half_life_days,
            ));
        }

        if !(0.0..=1.0).contains(&config.trust.anomaly_threshold) {
            return Err(ConfigError::InvalidAnomalyThreshold(
                config.trust.anomaly_threshold,
            ));
        }

        if !(0.0..=1.0).contains(&config.workflow.trust_threshold) {
            return Err(ConfigError::InvalidTrustThreshold(
                config.workflow.trust_threshold,
            ));
        }

        if config.database.path.is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }

        if config.database.max_connections == 0 {
            return Err(ConfigError::InvalidMaxConnections(
                config.database.max_connections,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        if config.slack.timeout_secs == 0 {
            return Err(ConfigError::InvalidSlackTimeout(config.slack.timeout_secs));
        }

        Ok(())
    }
}
