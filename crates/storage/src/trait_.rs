//! Storage trait abstraction.

use async_trait::async_trait;
use opstrack_core::{Operation, OperationId};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Stale write rejected by the version check.
    #[error("stale save of operation {id}: stored version {stored}, got {given}")]
    Conflict {
        /// Operation being saved
        id: OperationId,
        /// Version currently on disk
        stored: u64,
        /// Version the caller presented
        given: u64,
    },

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Storage abstraction for operations.
///
/// A save replaces the whole operation record, phase list included,
/// so readers never observe a partially written phase list. Saves
/// carry the caller's version stamp; a mismatch against the stored
/// record fails with [`StorageError::Conflict`] instead of silently
/// clobbering a concurrent edit.
#[async_trait]
pub trait Store: Send + Sync {
    /// Save an operation (create or update). Bumps the stored version.
    async fn save_operation(&mut self, op: &Operation) -> Result<()>;

    /// Load an operation by ID, phases ordered by start date.
    async fn load_operation(&self, id: OperationId) -> Result<Option<Operation>>;

    /// List all operations, newest first.
    async fn list_operations(&self) -> Result<Vec<Operation>>;
}
