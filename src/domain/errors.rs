use thiserror::Error;
use uuid::Uuid;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    #[error("Interaction not found: {0}")]
    InteractionNotFound(Uuid),

    #[error("Query failed: {0}")]
    QueryFailed(#[from] sqlx::Error),

    #[error("Invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(#[from] chrono::ParseError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid approval status: {0}")]
    InvalidApprovalStatus(String),

    #[error("Invalid count value: {0}")]
    InvalidCount(i64),
}

/// Convenience alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
