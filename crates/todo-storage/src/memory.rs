//! In-memory implementation of [`TodoStore`].
//!
//! [`InMemoryStore`] is a first-class backend for tests and ephemeral runs.
//! It keeps todos in a `BTreeMap` behind a single mutex, with the same
//! semantics as the SQLite backend: ascending-ID listings and IDs that are
//! never reused.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::StorageError;
use crate::traits::TodoStore;
use crate::types::{CategoryFilter, TodoFields, TodoId, TodoItem};

#[derive(Debug)]
struct State {
    todos: BTreeMap<TodoId, TodoItem>,
    /// Next ID to hand out. Only ever grows.
    next_id: i64,
}

/// In-memory storage backend.
#[derive(Debug)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        InMemoryStore {
            state: Mutex::new(State {
                todos: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, StorageError> {
        self.state.lock().map_err(|_| StorageError::LockPoisoned)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore for InMemoryStore {
    fn list_todos(&self, filter: CategoryFilter) -> Result<Vec<TodoItem>, StorageError> {
        let state = self.lock()?;
        Ok(state
            .todos
            .values()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect())
    }

    fn get_todo(&self, id: TodoId) -> Result<TodoItem, StorageError> {
        let state = self.lock()?;
        state
            .todos
            .get(&id)
            .cloned()
            .ok_or(StorageError::TodoNotFound(id))
    }

    fn create_todo(&self, fields: &TodoFields) -> Result<TodoItem, StorageError> {
        let mut state = self.lock()?;
        let id = TodoId(state.next_id);
        state.next_id += 1;
        let item = fields.clone().into_item(id);
        state.todos.insert(id, item.clone());
        Ok(item)
    }

    fn update_todo(&self, id: TodoId, fields: &TodoFields) -> Result<TodoItem, StorageError> {
        let mut state = self.lock()?;
        let item = state
            .todos
            .get_mut(&id)
            .ok_or(StorageError::TodoNotFound(id))?;
        item.text = fields.text.clone();
        item.completed = fields.completed;
        item.category = fields.category.clone();
        Ok(item.clone())
    }

    fn delete_todo(&self, id: TodoId) -> Result<TodoItem, StorageError> {
        let mut state = self.lock()?;
        state
            .todos
            .remove(&id)
            .ok_or(StorageError::TodoNotFound(id))
    }

    fn toggle_todo(&self, id: TodoId) -> Result<TodoItem, StorageError> {
        let mut state = self.lock()?;
        let item = state
            .todos
            .get_mut(&id)
            .ok_or(StorageError::TodoNotFound(id))?;
        item.completed = !item.completed;
        Ok(item.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_start_at_one_and_never_repeat() {
        let store = InMemoryStore::new();
        let a = store.create_todo(&TodoFields::new("a")).unwrap();
        assert_eq!(a.id, TodoId(1));

        store.delete_todo(a.id).unwrap();
        let b = store.create_todo(&TodoFields::new("b")).unwrap();
        assert_eq!(b.id, TodoId(2));
    }

    #[test]
    fn poisoned_lock_is_reported_not_panicked() {
        let store = std::sync::Arc::new(InMemoryStore::new());
        let poisoner = std::sync::Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.state.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        let err = store.list_todos(CategoryFilter::All).unwrap_err();
        assert!(matches!(err, StorageError::LockPoisoned));
    }
}
