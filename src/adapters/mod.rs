pub mod slack;
pub mod sqlite;
