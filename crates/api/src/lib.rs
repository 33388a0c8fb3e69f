//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for budget lines, dashboard KPIs, and change orders
//! - Tenant-resolution middleware
//! - JSON error envelopes
//!
//! Authentication lives upstream; the gateway forwards the resolved tenant
//! identity as headers, which the middleware turns into an explicit
//! `TenantContext` for every handler.

pub mod middleware;
pub mod routes;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use sitecost_shared::AppConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Application configuration.
    pub config: Arc<AppConfig>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
