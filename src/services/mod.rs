// Service exports
pub mod json_store;
pub mod sqlite;

use thiserror::Error;

pub use json_store::JsonPlayerStore;
pub use sqlite::PlayerRepository;

/// Errors that can occur when reading or writing player preferences
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
