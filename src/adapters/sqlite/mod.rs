pub mod agent_repository;
pub mod connection;
pub mod interaction_repository;
pub mod migrations;

pub use agent_repository::SqliteAgentRepository;
pub use connection::{create_pool, create_test_pool, verify_connection, ConnectionError, PoolConfig};
pub use interaction_repository::SqliteInteractionRepository;
pub use migrations::{all_embedded_migrations, Migration, MigrationError, Migrator};
