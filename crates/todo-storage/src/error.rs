//! Storage error types for todo-storage.
//!
//! [`StorageError`] covers the failure modes of the storage layer: the one
//! anticipated outcome (a missing todo) and the unanticipated ones (database,
//! migration, and poisoned-lock failures) that callers surface as internal
//! errors.

use thiserror::Error;

use crate::types::TodoId;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No todo with the given ID exists.
    #[error("todo not found: {0}")]
    TodoNotFound(TodoId),

    /// The underlying SQLite call failed.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Applying the schema migration failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// A thread panicked while holding the in-memory store lock.
    #[error("in-memory store lock poisoned")]
    LockPoisoned,
}
