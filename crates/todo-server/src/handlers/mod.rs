//! HTTP handler modules for the todo API.
//!
//! Handlers are thin: they parse the request, hand one store call to
//! [`AppState::with_store`](crate::state::AppState::with_store), and return
//! the resulting record as JSON. No business logic lives in handlers.

pub mod todos;
