//! Database layer for orgtrack.
//!
//! - `pool`: PostgreSQL connection pool management with health checks
//! - `migrations`: database migration runner
//!
//! Models live in the `models` module at the crate root.

pub mod migrations;
pub mod pool;
