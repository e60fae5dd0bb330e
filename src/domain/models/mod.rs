pub mod agent;
pub mod config;
pub mod interaction;
pub mod trust;

pub use agent::Agent;
pub use config::{
    Config, DatabaseConfig, FactorWeights, LoggingConfig, SlackConfig, TrustConfig, WorkflowConfig,
};
pub use interaction::{ApprovalStatus, Interaction};
pub use trust::{
    Anomaly, ApprovalDecision, ApprovalResolution, DecisionStatus, PendingApproval,
    TrustScoreResult,
};
