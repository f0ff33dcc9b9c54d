//! Todo request types.
//!
//! Responses reuse [`todo_storage::TodoItem`] directly; its JSON shape is
//! already `{id, text, completed, category}`.

use serde::Deserialize;

use todo_storage::{TodoFields, DEFAULT_CATEGORY};

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Body of `POST /todos`. Only `text` is required.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodoRequest {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default = "default_category")]
    pub category: String,
}

impl From<CreateTodoRequest> for TodoFields {
    fn from(req: CreateTodoRequest) -> Self {
        TodoFields {
            text: req.text,
            completed: req.completed,
            category: req.category,
        }
    }
}

/// Body of `PUT /todos/{id}`. Every mutable field is required and replaces
/// the stored value. Extra fields (such as a client-echoed `id`) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTodoRequest {
    pub text: String,
    pub completed: bool,
    pub category: String,
}

impl From<UpdateTodoRequest> for TodoFields {
    fn from(req: UpdateTodoRequest) -> Self {
        TodoFields {
            text: req.text,
            completed: req.completed,
            category: req.category,
        }
    }
}

/// Route parameters of `/todos/{id}`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TodoPath {
    pub id: i64,
}

/// Query string of `GET /todos`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTodosQuery {
    pub category: Option<String>,
}

impl ListTodosQuery {
    /// Collects the recognized parameters from raw query pairs. A repeated
    /// `category` takes its last value; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let category = pairs
            .into_iter()
            .filter(|(key, _)| key == "category")
            .map(|(_, value)| value)
            .last();
        ListTodosQuery { category }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_applies_defaults() {
        let req: CreateTodoRequest = serde_json::from_str(r#"{"text":"buy milk"}"#).unwrap();
        assert_eq!(
            TodoFields::from(req),
            TodoFields::new("buy milk")
        );
    }

    #[test]
    fn create_keeps_explicit_values() {
        let req: CreateTodoRequest =
            serde_json::from_str(r#"{"text":"t","completed":true,"category":"work"}"#).unwrap();
        assert!(req.completed);
        assert_eq!(req.category, "work");
    }

    #[test]
    fn update_requires_every_field() {
        let partial: Result<UpdateTodoRequest, _> =
            serde_json::from_str(r#"{"text":"only text"}"#);
        assert!(partial.is_err());
    }

    #[test]
    fn repeated_category_takes_last_value() {
        let query = ListTodosQuery::from_pairs(vec![
            ("category".to_string(), "completed".to_string()),
            ("page".to_string(), "2".to_string()),
            ("category".to_string(), "incomplete".to_string()),
        ]);
        assert_eq!(query.category.as_deref(), Some("incomplete"));
        assert_eq!(ListTodosQuery::from_pairs(Vec::new()), ListTodosQuery::default());
    }

    #[test]
    fn update_ignores_echoed_id() {
        let req: UpdateTodoRequest = serde_json::from_str(
            r#"{"id":3,"text":"t","completed":false,"category":"incomplete"}"#,
        )
        .unwrap();
        assert_eq!(req.text, "t");
    }
}
