//! Application state holding the shared todo store.
//!
//! [`AppState`] is constructed explicitly at startup and handed to the router,
//! which passes it to every handler through axum's `State` extractor. The
//! store itself is stateless between calls (each SQLite operation opens and
//! closes its own session), so the state needs no lock of its own.

use std::path::Path;
use std::sync::Arc;

use todo_storage::{InMemoryStore, SqliteStore, StorageError, TodoStore};

use crate::error::ApiError;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// The todo store every handler delegates to.
    pub store: Arc<dyn TodoStore>,
}

impl AppState {
    /// Wraps an already constructed store.
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        AppState { store }
    }

    /// Creates an `AppState` backed by the SQLite database at `db_path`,
    /// creating the file and table if absent.
    pub fn open(db_path: &Path) -> Result<Self, StorageError> {
        let store = SqliteStore::open(db_path)?;
        Ok(AppState::new(Arc::new(store)))
    }

    /// Creates an `AppState` backed by [`InMemoryStore`].
    pub fn in_memory() -> Self {
        AppState::new(Arc::new(InMemoryStore::new()))
    }

    /// Runs one store operation on the blocking thread pool.
    ///
    /// Store calls do synchronous file I/O, so they never run directly on an
    /// async worker thread.
    pub async fn with_store<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&dyn TodoStore) -> Result<T, StorageError> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let result = tokio::task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|e| ApiError::InternalError(format!("storage task failed: {}", e)))?;
        Ok(result?)
    }
}
