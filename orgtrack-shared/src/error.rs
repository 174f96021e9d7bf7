//! Data-access error type.
//!
//! Reads report an absent row as `Ok(None)`, never as an error. Mutations
//! that touch zero rows return [`DaoError::NotFound`] so callers can tell a
//! missing row apart from a failed write.

use thiserror::Error;

/// Errors produced by the model CRUD operations.
#[derive(Debug, Error)]
pub enum DaoError {
    /// A mutation targeted a row that does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Table-level entity name, e.g. "department"
        entity: &'static str,
        /// The primary key that was targeted
        id: i64,
    },

    /// A write unexpectedly affected zero rows on an existing target.
    #[error("write to {0} affected no rows")]
    WriteFailed(&'static str),

    /// Any other database failure (connectivity, constraint violation, ...).
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl DaoError {
    /// Shorthand for a missing-row error.
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        DaoError::NotFound { entity, id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = DaoError::not_found("department", 42);
        assert_eq!(err.to_string(), "department 42 not found");
    }

    #[test]
    fn test_write_failed_display() {
        let err = DaoError::WriteFailed("users_tasks");
        assert_eq!(err.to_string(), "write to users_tasks affected no rows");
    }
}
