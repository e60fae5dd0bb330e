pub mod agent_repository;
pub mod interaction_repository;
pub mod notifier;

pub use agent_repository::AgentRepository;
pub use interaction_repository::InteractionRepository;
pub use notifier::Notifier;
