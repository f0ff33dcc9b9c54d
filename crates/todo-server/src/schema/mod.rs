//! API schema types for request/response definitions.
//!
//! Types use serde derives for JSON and query-string deserialization.

pub mod todos;
