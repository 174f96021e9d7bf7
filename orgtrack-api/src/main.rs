//! # orgtrack API server
//!
//! JSON CRUD endpoints for departments, users, and tasks, backed by
//! PostgreSQL. The database is created and migrated at startup if needed.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p orgtrack-api
//! ```

use orgtrack_api::app::{build_router, AppState};
use orgtrack_api::config::Config;
use orgtrack_shared::db::migrations;
use orgtrack_shared::db::pool::{close_pool, create_pool, PoolSettings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orgtrack_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "orgtrack API server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    migrations::ensure_database_exists(&config.database.connect_url()).await?;

    let pool = create_pool(PoolSettings {
        url: config.database.url.clone(),
        user: config.database.user.clone(),
        password: config.database.password.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    migrations::run_migrations(&pool).await?;

    let state = AppState::new(pool.clone(), config.clone());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Server listening on http://{}", config.bind_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    close_pool(pool).await;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutdown signal received, exiting...");
    }
}
