//! Trustgate - trust scoring and approval gating for autonomous agents.
//!
//! Trustgate computes a continuous trust score for an agent from its
//! historical interaction telemetry and uses that score to drive a
//! human-in-the-loop approval workflow gating risky agent actions.
//!
//! # Architecture
//!
//! The crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): value types, repository and notifier ports
//! - **Service Layer** (`services`): the trust score engine, the approval
//!   workflow, and rolling-window analytics
//! - **Adapters** (`adapters`): SQLite persistence and Slack notifications
//! - **Infrastructure** (`infrastructure`): configuration loading and
//!   tracing setup
//! - **CLI Layer** (`cli`): thin command surface over the services
//!
//! # Example
//!
//! ```ignore
//! use trustgate::services::TrustScoreCalculator;
//! use chrono::Utc;
//!
//! let calculator = TrustScoreCalculator::new();
//! let score = calculator.calculate(&interactions, Utc::now());
//! assert!(score.overall_score <= 1.0);
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Agent, Anomaly, ApprovalDecision, ApprovalResolution, ApprovalStatus, Config, DecisionStatus,
    FactorWeights, Interaction, PendingApproval, TrustConfig, TrustScoreResult, WorkflowConfig,
};
pub use domain::ports::{AgentRepository, InteractionRepository, Notifier};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{TrustAnalyticsService, TrustScoreCalculator, ValidationWorkflow};
