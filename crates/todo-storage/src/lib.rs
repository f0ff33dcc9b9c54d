//! Storage layer for todo items.
//!
//! Provides the [`TodoStore`] trait defining the storage contract, plus the
//! [`SqliteStore`] and [`InMemoryStore`] backends.
//!
//! # Architecture
//!
//! Every store operation is self-contained: it acquires what it needs, performs
//! exactly one read or one single-row write, and releases everything before
//! returning. For [`SqliteStore`] that means one [`Session`] (one SQLite
//! connection) per call, dropped on every exit path.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`types`]: TodoId, TodoItem, TodoFields, CategoryFilter
//! - [`traits`]: TodoStore trait definition
//! - [`memory`]: InMemoryStore implementation
//! - [`schema`]: migration setup and connection configuration
//! - [`sqlite`]: SqliteStore and Session

pub mod error;
pub mod memory;
pub mod schema;
pub mod sqlite;
pub mod traits;
pub mod types;

// Re-export key types for ergonomic use.
pub use error::StorageError;
pub use memory::InMemoryStore;
pub use sqlite::{Session, SqliteStore};
pub use traits::TodoStore;
pub use types::{CategoryFilter, TodoFields, TodoId, TodoItem, DEFAULT_CATEGORY};
