//! The [`TodoStore`] trait defining the storage contract for todo items.
//!
//! All backends ([`InMemoryStore`](crate::InMemoryStore),
//! [`SqliteStore`](crate::SqliteStore)) implement this trait so the HTTP layer
//! can hold either behind an `Arc<dyn TodoStore>`.

use crate::error::StorageError;
use crate::types::{CategoryFilter, TodoFields, TodoId, TodoItem};

/// The storage contract for todo items.
///
/// Every method is a complete unit of work: writes are committed before the
/// method returns, and the returned record reflects the committed state. The
/// trait is synchronous; async callers run it on a blocking thread.
pub trait TodoStore: Send + Sync {
    /// Lists todos passing `filter`, in ascending ID order.
    fn list_todos(&self, filter: CategoryFilter) -> Result<Vec<TodoItem>, StorageError>;

    /// Retrieves a single todo.
    fn get_todo(&self, id: TodoId) -> Result<TodoItem, StorageError>;

    /// Persists a new todo and returns it with its assigned ID.
    fn create_todo(&self, fields: &TodoFields) -> Result<TodoItem, StorageError>;

    /// Overwrites all mutable fields of an existing todo.
    fn update_todo(&self, id: TodoId, fields: &TodoFields) -> Result<TodoItem, StorageError>;

    /// Permanently removes a todo, returning its state just before removal.
    fn delete_todo(&self, id: TodoId) -> Result<TodoItem, StorageError>;

    /// Flips `completed`, leaving the other fields untouched.
    fn toggle_todo(&self, id: TodoId) -> Result<TodoItem, StorageError>;
}
