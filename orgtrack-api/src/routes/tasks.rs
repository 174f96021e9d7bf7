//! Task endpoints.
//!
//! # Endpoints
//!
//! ```text
//! GET    /tasks/      - list all tasks
//! POST   /tasks/      - create a task and its assignments (201, created body)
//! GET    /tasks/{id}  - fetch one task
//! PUT    /tasks/{id}  - update name and owning department
//! DELETE /tasks/{id}  - delete a task and its assignment rows
//! ```

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::app::AppState;
use crate::dto::TaskDto;
use crate::error::{ApiError, ApiResult};

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<TaskDto>>> {
    Ok(Json(state.tasks.get_all().await?))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<TaskDto>> {
    match state.tasks.get(id).await? {
        Some(dto) => Ok(Json(dto)),
        None => Err(ApiError::NotFound(format!("task {} not found", id))),
    }
}

pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<TaskDto>,
) -> ApiResult<(StatusCode, Json<TaskDto>)> {
    let created = state.tasks.create(&dto).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// The path id wins over any id in the body.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<TaskDto>,
) -> ApiResult<StatusCode> {
    state.tasks.update(id, &dto).await?;
    Ok(StatusCode::OK)
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    state.tasks.delete(id).await?;
    Ok(StatusCode::OK)
}
