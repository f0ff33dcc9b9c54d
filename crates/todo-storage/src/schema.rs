//! Migration setup and connection configuration for the SQLite backend.
//!
//! Uses `rusqlite_migration` to create the `todos` table via SQLite's
//! `user_version` pragma. The single migration is embedded at compile time via
//! `include_str!`; there is no schema evolution beyond creating it.

use std::path::Path;

use rusqlite::Connection;
use rusqlite_migration::{Migrations, M};

use crate::error::StorageError;

fn migrations() -> Migrations<'static> {
    Migrations::new(vec![M::up(include_str!("migrations/001_create_todos.sql"))])
}

/// Opens (or creates) the database at `path`, switches it to WAL mode, and
/// ensures the schema exists.
///
/// Called once at startup. Per-request connections go through
/// [`open_connection`].
pub fn initialize_database(path: &Path) -> Result<(), StorageError> {
    let mut conn = Connection::open(path)?;
    // WAL is persistent in the file, so later connections inherit it.
    conn.pragma_update(None, "journal_mode", "WAL")?;
    migrations()
        .to_latest(&mut conn)
        .map_err(|e| StorageError::Migration(e.to_string()))?;
    Ok(())
}

/// Opens a connection to an already initialized database.
pub fn open_connection(path: &Path) -> Result<Connection, StorageError> {
    let conn = Connection::open(path)?;
    // NORMAL synchronous is safe with WAL mode and avoids an fsync per commit.
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_valid() {
        assert!(migrations().validate().is_ok());
    }

    #[test]
    fn initialize_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.db");

        initialize_database(&path).unwrap();
        initialize_database(&path).unwrap();

        let conn = open_connection(&path).unwrap();
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'todos'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 1);

        let mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }
}
