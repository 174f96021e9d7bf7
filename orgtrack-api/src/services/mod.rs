//! Per-entity services.
//!
//! Each service owns a pool handle and orchestrates one resource: map the
//! request DTO into a write input, call the model, and map the resulting
//! entity graph back into a response DTO with its nested structure filled
//! in. Handlers never touch entities directly.

pub mod department;
pub mod task;
pub mod user;

use orgtrack_shared::error::DaoError;
use thiserror::Error;

use crate::mapper::MapError;

pub use department::DepartmentService;
pub use task::TaskService;
pub use user::UserService;

/// Failures surfaced by the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Request body is missing a field the operation requires
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Data-access failure
    #[error(transparent)]
    Dao(#[from] DaoError),
}

impl From<MapError> for ServiceError {
    fn from(err: MapError) -> Self {
        match err {
            MapError::MissingField(field) => ServiceError::MissingField(field),
        }
    }
}
