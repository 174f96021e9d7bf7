//! # orgtrack shared library
//!
//! Data layer for the orgtrack service: connection pooling, migrations, and
//! the entity models with their SQL operations.
//!
//! ## Module Organization
//!
//! - `db`: connection pool and migration runner
//! - `models`: Department, Task, and User entities with CRUD operations
//! - `error`: the data-access error type

pub mod db;
pub mod error;
pub mod models;

/// Current version of the orgtrack shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
