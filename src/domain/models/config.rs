use serde::{Deserialize, Serialize};

/// Main configuration structure for Trustgate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Tenant this instance operates for
    #[serde(default = "default_tenant_id")]
    pub tenant_id: i64,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Trust score engine configuration
    #[serde(default)]
    pub trust: TrustConfig,

    /// Approval workflow configuration
    #[serde(default)]
    pub workflow: WorkflowConfig,

    /// Slack notification configuration
    #[serde(default)]
    pub slack: SlackConfig,
}

const fn default_tenant_id() -> i64 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tenant_id: default_tenant_id(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
            trust: TrustConfig::default(),
            workflow: WorkflowConfig::default(),
            slack: SlackConfig::default(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> String {
    ".trustgate/trustgate.db".to_string()
}

const fn default_max_connections() -> u32 {
    10
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Per-factor weights for the composite trust score.
///
/// Weights are a scale parameter, not a probability distribution:
/// they are not required to sum to 1 and are never normalized. The
/// overall score is the weighted sum of factor scores clamped to
/// [0,1], so rescaling weights changes score magnitudes relative to
/// the approval threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FactorWeights {
    #[serde(default = "default_risk_weight")]
    pub risk: f64,
    #[serde(default = "default_consistency_weight")]
    pub consistency: f64,
    #[serde(default = "default_behavior_weight")]
    pub behavior: f64,
    #[serde(default = "default_detection_weight")]
    pub detection: f64,
}

const fn default_risk_weight() -> f64 {
    0.4
}

const fn default_consistency_weight() -> f64 {
    0.2
}

const fn default_behavior_weight() -> f64 {
    0.2
}

const fn default_detection_weight() -> f64 {
    0.2
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            risk: default_risk_weight(),
            consistency: default_consistency_weight(),
            behavior: default_behavior_weight(),
            detection: default_detection_weight(),
        }
    }
}

/// Trust score engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TrustConfig {
    /// Factor weights
    #[serde(default)]
    pub weights: FactorWeights,

    /// Half-life in days for exponential recency weighting
    #[serde(default = "default_half_life_days")]
    pub time_decay_half_life_days: f64,

    /// Minimum absolute risk delta between consecutive interactions
    /// to flag an anomaly
    #[serde(default = "default_anomaly_threshold")]
    pub anomaly_threshold: f64,
}

const fn default_half_life_days() -> f64 {
    7.0
}

const fn default_anomaly_threshold() -> f64 {
    0.5
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            weights: FactorWeights::default(),
            time_decay_half_life_days: default_half_life_days(),
            anomaly_threshold: default_anomaly_threshold(),
        }
    }
}

/// Approval workflow configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct WorkflowConfig {
    /// Trust score below which manual approval is mandatory
    #[serde(default = "default_trust_threshold")]
    pub trust_threshold: f64,
}

const fn default_trust_threshold() -> f64 {
    0.7
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            trust_threshold: default_trust_threshold(),
        }
    }
}

/// Slack notification configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SlackConfig {
    /// Incoming webhook URL; empty disables notifications
    #[serde(default)]
    pub webhook_url: String,

    /// Request timeout in seconds for webhook delivery
    #[serde(default = "default_slack_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_slack_timeout_secs() -> u64 {
    10
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            timeout_secs: default_slack_timeout_secs(),
        }
    }
}
