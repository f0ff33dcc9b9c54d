//! SQLite implementation of [`TodoStore`].
//!
//! [`SqliteStore`] owns only the database path. Each store operation opens a
//! [`Session`], a single connection scoped to that operation, and drops it
//! before returning, whether the operation succeeded or not. No connection is
//! shared between operations, so concurrent requests never contend on
//! in-process state; SQLite's own locking arbitrates between sessions.
//!
//! Writes run in `IMMEDIATE` transactions so a writer takes the database
//! write lock up front and waits on the busy timeout instead of failing on a
//! lock upgrade.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension, Params, Row, TransactionBehavior};

use crate::error::StorageError;
use crate::traits::TodoStore;
use crate::types::{CategoryFilter, TodoFields, TodoId, TodoItem};

/// SQLite-backed implementation of [`TodoStore`].
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and ensures the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        crate::schema::initialize_database(&path)?;
        Ok(SqliteStore { path })
    }

    /// Location of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a fresh session. The connection closes when the session drops.
    pub fn session(&self) -> Result<Session, StorageError> {
        let conn = crate::schema::open_connection(&self.path)?;
        Ok(Session { conn })
    }
}

/// A scoped handle to the database: one connection, one unit of work.
pub struct Session {
    conn: Connection,
}

fn row_to_item(row: &Row<'_>) -> rusqlite::Result<TodoItem> {
    Ok(TodoItem {
        id: TodoId(row.get(0)?),
        text: row.get(1)?,
        completed: row.get(2)?,
        category: row.get(3)?,
    })
}

impl Session {
    pub fn list(&self, filter: CategoryFilter) -> Result<Vec<TodoItem>, StorageError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, text, completed, category FROM todos
             WHERE ?1 IS NULL OR completed = ?1
             ORDER BY id",
        )?;
        let rows = stmt.query_map(params![filter.completed()], row_to_item)?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    pub fn find(&self, id: TodoId) -> Result<Option<TodoItem>, StorageError> {
        let item = self
            .conn
            .query_row(
                "SELECT id, text, completed, category FROM todos WHERE id = ?1",
                params![id.0],
                row_to_item,
            )
            .optional()?;
        Ok(item)
    }

    pub fn insert(&mut self, fields: &TodoFields) -> Result<TodoItem, StorageError> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let item = tx.query_row(
            "INSERT INTO todos (text, completed, category) VALUES (?1, ?2, ?3)
             RETURNING id, text, completed, category",
            params![fields.text, fields.completed, fields.category],
            row_to_item,
        )?;
        tx.commit()?;
        Ok(item)
    }

    pub fn update(&mut self, id: TodoId, fields: &TodoFields) -> Result<TodoItem, StorageError> {
        self.write_one(
            id,
            "UPDATE todos SET text = ?1, completed = ?2, category = ?3 WHERE id = ?4
             RETURNING id, text, completed, category",
            params![fields.text, fields.completed, fields.category, id.0],
        )
    }

    /// Deletes the row, returning it as it was before deletion.
    pub fn delete(&mut self, id: TodoId) -> Result<TodoItem, StorageError> {
        self.write_one(
            id,
            "DELETE FROM todos WHERE id = ?1 RETURNING id, text, completed, category",
            params![id.0],
        )
    }

    pub fn toggle(&mut self, id: TodoId) -> Result<TodoItem, StorageError> {
        self.write_one(
            id,
            "UPDATE todos SET completed = NOT completed WHERE id = ?1
             RETURNING id, text, completed, category",
            params![id.0],
        )
    }

    /// Runs a single-row write with a `RETURNING` clause and commits it.
    ///
    /// If no row matched, the transaction rolls back on drop and the todo is
    /// reported missing.
    fn write_one<P: Params>(
        &mut self,
        id: TodoId,
        sql: &str,
        params: P,
    ) -> Result<TodoItem, StorageError> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let item = tx.query_row(sql, params, row_to_item).optional()?;
        match item {
            Some(item) => {
                tx.commit()?;
                Ok(item)
            }
            None => Err(StorageError::TodoNotFound(id)),
        }
    }
}

impl TodoStore for SqliteStore {
    fn list_todos(&self, filter: CategoryFilter) -> Result<Vec<TodoItem>, StorageError> {
        self.session()?.list(filter)
    }

    fn get_todo(&self, id: TodoId) -> Result<TodoItem, StorageError> {
        self.session()?
            .find(id)?
            .ok_or(StorageError::TodoNotFound(id))
    }

    fn create_todo(&self, fields: &TodoFields) -> Result<TodoItem, StorageError> {
        self.session()?.insert(fields)
    }

    fn update_todo(&self, id: TodoId, fields: &TodoFields) -> Result<TodoItem, StorageError> {
        self.session()?.update(id, fields)
    }

    fn delete_todo(&self, id: TodoId) -> Result<TodoItem, StorageError> {
        self.session()?.delete(id)
    }

    fn toggle_todo(&self, id: TodoId) -> Result<TodoItem, StorageError> {
        self.session()?.toggle(id)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;

    fn temp_store() -> (tempfile::TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(dir.path().join("todos.db")).unwrap();
        (dir, store)
    }

    #[test]
    fn data_survives_reopening_the_file() {
        let (dir, store) = temp_store();
        let created = store.create_todo(&TodoFields::new("persist me")).unwrap();
        drop(store);

        let reopened = SqliteStore::open(dir.path().join("todos.db")).unwrap();
        assert_eq!(reopened.get_todo(created.id).unwrap(), created);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let (_dir, store) = temp_store();
        let first = store.create_todo(&TodoFields::new("a")).unwrap();
        let second = store.create_todo(&TodoFields::new("b")).unwrap();
        store.delete_todo(second.id).unwrap();

        let third = store.create_todo(&TodoFields::new("c")).unwrap();
        assert!(third.id > second.id);
        assert_ne!(third.id, first.id);
    }

    #[test]
    fn failed_write_leaves_session_reusable() {
        let (_dir, store) = temp_store();
        let mut session = store.session().unwrap();

        let err = session.toggle(TodoId(42)).unwrap_err();
        assert!(matches!(err, StorageError::TodoNotFound(TodoId(42))));

        // The rolled back transaction must not block further writes.
        let item = session.insert(&TodoFields::new("after failure")).unwrap();
        assert_eq!(session.find(item.id).unwrap(), Some(item));
    }

    #[test]
    fn session_list_filters_in_sql() {
        let (_dir, store) = temp_store();
        let mut session = store.session().unwrap();
        session.insert(&TodoFields::new("open")).unwrap();
        session
            .insert(&TodoFields::new("done").completed(true))
            .unwrap();

        let done = session.list(CategoryFilter::Completed).unwrap();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].text, "done");

        let open = session.list(CategoryFilter::Incomplete).unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].text, "open");

        assert_eq!(session.list(CategoryFilter::All).unwrap().len(), 2);
    }

    #[test]
    fn concurrent_sessions_assign_unique_ids() {
        let (_dir, store) = temp_store();
        let store = Arc::new(store);

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    (0..10)
                        .map(|i| {
                            store
                                .create_todo(&TodoFields::new(format!("t{t}-{i}")))
                                .unwrap()
                                .id
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(ids.insert(id), "duplicate id {id}");
            }
        }
        assert_eq!(ids.len(), 80);
        assert_eq!(store.list_todos(CategoryFilter::All).unwrap().len(), 80);
    }
}
