//! Database connection pool management.
//!
//! Builds a PostgreSQL connection pool with sqlx. The connection source is
//! configured from three external settings (url plus optional username and
//! password overrides) and a handful of pool tuning knobs; the pool is
//! health-checked before it is handed to the application.
//!
//! # Example
//!
//! ```no_run
//! use orgtrack_shared::db::pool::{create_pool, PoolSettings};
//!
//! # async fn example() -> Result<(), sqlx::Error> {
//! let settings = PoolSettings {
//!     url: std::env::var("DATABASE_URL").unwrap(),
//!     ..Default::default()
//! };
//!
//! let pool = create_pool(settings).await?;
//! # Ok(())
//! # }
//! ```

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Configuration for the database connection pool.
///
/// Timeouts are in seconds for ease of configuration from environment
/// variables.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    /// PostgreSQL connection URL (e.g. "postgresql://localhost:5432/orgtrack")
    pub url: String,

    /// Username override applied on top of the URL, if set
    pub user: Option<String>,

    /// Password override applied on top of the URL, if set
    pub password: Option<String>,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of idle connections to keep warm
    pub min_connections: u32,

    /// Timeout for acquiring a connection from the pool (seconds)
    pub connect_timeout_seconds: u64,

    /// How long a connection may sit idle before being closed (seconds)
    pub idle_timeout_seconds: Option<u64>,

    /// Maximum lifetime of a connection before recycling (seconds)
    pub max_lifetime_seconds: Option<u64>,

    /// Whether to test connections before returning them from the pool
    pub test_before_acquire: bool,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            user: None,
            password: None,
            max_connections: 10,
            min_connections: 2,
            connect_timeout_seconds: 30,
            idle_timeout_seconds: Some(600),
            max_lifetime_seconds: Some(1800),
            test_before_acquire: true,
        }
    }
}

/// Creates and initializes a PostgreSQL connection pool.
///
/// Applies the username/password overrides onto the parsed URL, builds the
/// pool, and performs a health check so an unreachable database fails at
/// startup instead of on the first request.
///
/// # Errors
///
/// Returns an error if the URL is invalid, the database is unreachable, or
/// the health check fails.
pub async fn create_pool(settings: PoolSettings) -> Result<PgPool, sqlx::Error> {
    info!(
        max_connections = settings.max_connections,
        min_connections = settings.min_connections,
        connect_timeout_seconds = settings.connect_timeout_seconds,
        "Creating database connection pool"
    );

    let mut connect = PgConnectOptions::from_str(&settings.url)?;
    if let Some(ref user) = settings.user {
        connect = connect.username(user);
    }
    if let Some(ref password) = settings.password {
        connect = connect.password(password);
    }

    let mut pool_options = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.connect_timeout_seconds))
        .test_before_acquire(settings.test_before_acquire);

    if let Some(idle_timeout) = settings.idle_timeout_seconds {
        pool_options = pool_options.idle_timeout(Duration::from_secs(idle_timeout));
        debug!(idle_timeout_seconds = idle_timeout, "Set idle timeout");
    }

    if let Some(max_lifetime) = settings.max_lifetime_seconds {
        pool_options = pool_options.max_lifetime(Duration::from_secs(max_lifetime));
        debug!(max_lifetime_seconds = max_lifetime, "Set max lifetime");
    }

    let pool = pool_options.connect_with(connect).await?;

    health_check(&pool).await?;

    info!("Database connection pool created successfully");
    Ok(pool)
}

/// Performs a health check on the database connection.
///
/// Executes a trivial query to verify the database is reachable.
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    debug!("Performing database health check");

    let result: (i32,) = sqlx::query_as("SELECT 1").fetch_one(pool).await?;

    if result.0 == 1 {
        debug!("Database health check passed");
        Ok(())
    } else {
        warn!("Database health check returned unexpected value: {}", result.0);
        Err(sqlx::Error::Protocol(
            "Health check returned unexpected value".into(),
        ))
    }
}

/// Snapshot of the pool's current state for monitoring.
#[derive(Debug, Clone)]
pub struct PoolStats {
    /// Connections currently in use
    pub active_connections: usize,

    /// Idle connections available
    pub idle_connections: usize,

    /// Total connections in the pool
    pub total_connections: usize,
}

/// Gets current pool statistics.
pub fn pool_stats(pool: &PgPool) -> PoolStats {
    let size = pool.size();
    let idle = pool.num_idle();

    PoolStats {
        active_connections: (size as usize).saturating_sub(idle),
        idle_connections: idle,
        total_connections: size as usize,
    }
}

/// Gracefully closes the connection pool during shutdown.
pub async fn close_pool(pool: PgPool) {
    info!("Closing database connection pool");
    pool.close().await;
    info!("Database connection pool closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_settings_default() {
        let settings = PoolSettings::default();
        assert_eq!(settings.max_connections, 10);
        assert_eq!(settings.min_connections, 2);
        assert_eq!(settings.connect_timeout_seconds, 30);
        assert_eq!(settings.idle_timeout_seconds, Some(600));
        assert_eq!(settings.max_lifetime_seconds, Some(1800));
        assert!(settings.test_before_acquire);
        assert!(settings.user.is_none());
        assert!(settings.password.is_none());
    }

    // Integration tests that require a running database live in tests/
}
