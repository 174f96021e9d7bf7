//! Route handlers, one module per resource.

pub mod departments;
pub mod health;
pub mod tasks;
pub mod users;

use crate::error::ApiError;

/// Handler for PUT/DELETE on a collection root. Those verbs need an id path
/// segment, so the bare path is a client error rather than a 405.
pub async fn missing_id() -> ApiError {
    ApiError::BadRequest("Missing id path segment".to_string())
}
