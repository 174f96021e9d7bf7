//! User endpoints.
//!
//! # Endpoints
//!
//! ```text
//! GET    /users/      - list all users
//! POST   /users/      - create a user (201, created body)
//! GET    /users/{id}  - fetch one user
//! PUT    /users/{id}  - update names and owning department
//! DELETE /users/{id}  - delete a user
//! ```

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::app::AppState;
use crate::dto::UserDto;
use crate::error::{ApiError, ApiResult};

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<UserDto>>> {
    Ok(Json(state.users.get_all().await?))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<UserDto>> {
    match state.users.get(id).await? {
        Some(dto) => Ok(Json(dto)),
        None => Err(ApiError::NotFound(format!("user {} not found", id))),
    }
}

pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<UserDto>,
) -> ApiResult<(StatusCode, Json<UserDto>)> {
    let created = state.users.create(&dto).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// The path id wins over any id in the body.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<UserDto>,
) -> ApiResult<StatusCode> {
    state.users.update(id, &dto).await?;
    Ok(StatusCode::OK)
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    state.users.delete(id).await?;
    Ok(StatusCode::OK)
}
