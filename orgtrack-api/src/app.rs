//! Application state and router builder.
//!
//! The dependency graph is wired here, once, at startup: the pool feeds the
//! per-entity services, and handlers reach them through Axum's `State`
//! extractor.
//!
//! # Example
//!
//! ```no_run
//! use orgtrack_api::{app::{build_router, AppState}, config::Config};
//! use sqlx::PgPool;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let pool = PgPool::connect(&config.database.url).await?;
//! let state = AppState::new(pool, config);
//! let app = build_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

use axum::{routing::get, Router};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::Config;
use crate::routes;
use crate::services::{DepartmentService, TaskService, UserService};

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. Services
/// hold pool clones, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Department service
    pub departments: DepartmentService,

    /// Task service
    pub tasks: TaskService,

    /// User service
    pub users: UserService,
}

impl AppState {
    /// Creates new application state with all services wired to the pool.
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            departments: DepartmentService::new(db.clone()),
            tasks: TaskService::new(db.clone()),
            users: UserService::new(db.clone()),
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware.
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health               # Health check
/// ├── /departments/         # Department CRUD
/// │   ├── GET    /          # List
/// │   ├── POST   /          # Create
/// │   ├── GET    /:id       # Fetch
/// │   ├── PUT    /:id       # Update
/// │   └── DELETE /:id       # Delete
/// ├── /tasks/               # Task CRUD (same verbs)
/// └── /users/               # User CRUD (same verbs)
/// ```
///
/// PUT and DELETE on a collection root answer 400 rather than 405: the verb
/// is fine, the id segment is missing.
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer, permissive)
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route(
            "/departments/",
            get(routes::departments::list)
                .post(routes::departments::create)
                .put(routes::missing_id)
                .delete(routes::missing_id),
        )
        .route(
            "/departments/:id",
            get(routes::departments::get)
                .put(routes::departments::update)
                .delete(routes::departments::delete),
        )
        .route(
            "/tasks/",
            get(routes::tasks::list)
                .post(routes::tasks::create)
                .put(routes::missing_id)
                .delete(routes::missing_id),
        )
        .route(
            "/tasks/:id",
            get(routes::tasks::get)
                .put(routes::tasks::update)
                .delete(routes::tasks::delete),
        )
        .route(
            "/users/",
            get(routes::users::list)
                .post(routes::users::create)
                .put(routes::missing_id)
                .delete(routes::missing_id),
        )
        .route(
            "/users/:id",
            get(routes::users::get)
                .put(routes::users::update)
                .delete(routes::users::delete),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
