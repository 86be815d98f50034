//! # HTTP API
//!
//! axum router over the saved-profile list and the employee repository.
//!
//! Routes:
//! - `GET /health`
//! - `/api/employees` and `/api/employees/{id}`
//! - `/api/characters`, `/api/characters/{name}`, `/api/characters/{name}/markdown`
//! - `POST /api/characters/random`, `POST /api/characters/generate`
//!
//! Everything under `/api` requires the configured bearer key, if any.

mod auth;
mod characters;
mod employees;
mod error;

pub use error::ApiError;

use crate::cli::Context;
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use charforge_core::{EmployeeRepository, ProfileStore, RedbStorage};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub profiles: ProfileStore<RedbStorage>,
    pub employees: EmployeeRepository,
    pub api_key: Option<String>,
}

impl AppState {
    pub fn new(ctx: Context, api_key: Option<String>) -> Self {
        // An empty key would accept "Bearer " with nothing after it
        let api_key = api_key.filter(|key| !key.is_empty());
        Self {
            profiles: ctx.profiles,
            employees: ctx.employees,
            api_key,
        }
    }
}

/// Run a store operation on the blocking pool.
///
/// redb transactions block on file I/O, so handlers never run them on an
/// async worker.
pub(crate) async fn blocking<T, F>(state: &Arc<AppState>, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&AppState) -> Result<T, ApiError> + Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || op(&state))
        .await
        .map_err(|e| ApiError::Internal(format!("spawn_blocking join: {e}")))?
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/employees", get(employees::list).post(employees::create))
        .route(
            "/employees/{id}",
            get(employees::get)
                .put(employees::update)
                .delete(employees::delete),
        )
        .route("/characters", get(characters::list).post(characters::save))
        .route("/characters/random", post(characters::random))
        .route("/characters/generate", post(characters::generate))
        .route(
            "/characters/{name}",
            get(characters::get).delete(characters::delete),
        )
        .route("/characters/{name}/markdown", get(characters::markdown))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            auth::require_api_key,
        ));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Serve `router` on `bind` until Ctrl-C.
pub async fn serve(state: Arc<AppState>, bind: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        auth = state.api_key.is_some(),
        "HTTP API listening"
    );
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown requested"),
        Err(e) => {
            tracing::error!(error = %e, "cannot listen for Ctrl-C, serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
