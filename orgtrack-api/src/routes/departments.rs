//! Department endpoints.
//!
//! # Endpoints
//!
//! ```text
//! GET    /departments/      - list all departments
//! POST   /departments/      - create a department (201, created body)
//! GET    /departments/{id}  - fetch one department
//! PUT    /departments/{id}  - rename a department
//! DELETE /departments/{id}  - delete a department
//! ```

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::app::AppState;
use crate::dto::DepartmentDto;
use crate::error::{ApiError, ApiResult};

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<DepartmentDto>>> {
    Ok(Json(state.departments.get_all().await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DepartmentDto>> {
    match state.departments.get(id).await? {
        Some(dto) => Ok(Json(dto)),
        None => Err(ApiError::NotFound(format!("department {} not found", id))),
    }
}

pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<DepartmentDto>,
) -> ApiResult<(StatusCode, Json<DepartmentDto>)> {
    let created = state.departments.create(&dto).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// The path id wins over any id in the body.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<DepartmentDto>,
) -> ApiResult<StatusCode> {
    state.departments.update(id, &dto).await?;
    Ok(StatusCode::OK)
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    state.departments.delete(id).await?;
    Ok(StatusCode::OK)
}
