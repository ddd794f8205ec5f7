//! `PostgreSQL` adapters for board persistence.

mod directory;
mod log_store;
mod models;
mod schema;
mod task_store;

pub use directory::PostgresUserDirectory;
pub use log_store::PostgresActionLogStore;
pub use task_store::{BoardPgPool, PostgresTaskStore};
