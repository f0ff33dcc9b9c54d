//! Storage-layer types for todo identity, content, and list filtering.
//!
//! [`TodoId`] lives here because identity is a storage concern: a todo only
//! gains an ID when it is persisted.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category assigned to a todo when the creator does not supply one.
pub const DEFAULT_CATEGORY: &str = "incomplete";

/// Unique identifier for a stored todo.
///
/// The inner `i64` aligns with SQLite's `INTEGER PRIMARY KEY` and serializes
/// as a bare JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TodoId(pub i64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Server-assigned identifier, fixed for the lifetime of the record.
    pub id: TodoId,
    /// Free-form todo text.
    pub text: String,
    /// Whether the todo is done.
    pub completed: bool,
    /// Free-text label. Not constrained to the filter values.
    pub category: String,
}

/// The mutable fields of a todo.
///
/// Create persists these as a new record; update overwrites every one of them
/// on an existing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoFields {
    pub text: String,
    pub completed: bool,
    pub category: String,
}

impl TodoFields {
    /// Fields for a new, not yet completed todo in the default category.
    pub fn new(text: impl Into<String>) -> Self {
        TodoFields {
            text: text.into(),
            completed: false,
            category: DEFAULT_CATEGORY.to_string(),
        }
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Attaches an ID, producing the record these fields describe.
    pub fn into_item(self, id: TodoId) -> TodoItem {
        TodoItem {
            id,
            text: self.text,
            completed: self.completed,
            category: self.category,
        }
    }
}

/// Which todos a listing returns.
///
/// Filtering keys off the `completed` flag, never the stored `category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Completed,
    Incomplete,
}

impl CategoryFilter {
    /// Interprets the optional `category` list parameter.
    ///
    /// Only `"completed"` and `"incomplete"` select a subset; any other value,
    /// including an empty string, lists everything.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("completed") => CategoryFilter::Completed,
            Some("incomplete") => CategoryFilter::Incomplete,
            _ => CategoryFilter::All,
        }
    }

    /// The `completed` value a todo must have to pass, or `None` for all.
    pub fn completed(self) -> Option<bool> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Completed => Some(true),
            CategoryFilter::Incomplete => Some(false),
        }
    }

    pub fn matches(self, item: &TodoItem) -> bool {
        self.completed().map_or(true, |want| item.completed == want)
    }
}
