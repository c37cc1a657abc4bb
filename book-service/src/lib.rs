//! Hipster Books catalogue service.
//!
//! Serves a fixed set of seeded books over HTTP:
//!
//! | Route | Response |
//! |---|---|
//! | `GET /` and `GET /books` | every book, ascending by id |
//! | `GET /books/{id}` | one book, `400` for a malformed id, `404` for an unknown one |
//! | `GET /status` | health and book count |
//! | `GET /api-docs/openapi.json` | OpenAPI document |
//!
//! The store is chosen with `BACKEND_TYPE` (`memory`, `postgres` or `redis`) and is
//! read-only once seeded.

use axum::{routing::get, Router};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use config::{BackendKind, Config};
use models::storage::{MemoryBackend, PostgresBackend, RedisBackend, StorageBackend, StorageError};
use routes::{
    books::{get_book, list_books},
    docs::openapi_json,
    health::health_check,
};

pub type Backend = Arc<dyn StorageBackend + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub backend: Backend,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            started_at: Utc::now(),
        }
    }
}

pub async fn connect_backend(config: &Config) -> Result<Backend, StorageError> {
    let backend: Backend = match config.backend {
        BackendKind::Memory => {
            info!("Using in-memory backend");
            Arc::new(MemoryBackend::seeded())
        }
        BackendKind::Postgres => {
            info!("Using PostgreSQL backend");
            Arc::new(PostgresBackend::new(&config.database_url).await?)
        }
        BackendKind::Redis => {
            info!("Using Redis backend");
            Arc::new(RedisBackend::new(&config.redis_url).await?)
        }
    };

    Ok(backend)
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_books))
        .route("/books", get(list_books))
        .route("/books/:id", get(get_book))
        .route("/status", get(health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
