//! API module - HTTP handlers and routes

pub mod handlers;

use axum::{
    middleware,
    routing::{delete, get},
    Router,
};

use crate::audit::capture_request;
use crate::db::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        .route("/api/health", get(handlers::health_check))
        // Query surface (never captured)
        .route("/api/logs", get(handlers::list_audit_logs))
        .route("/api/logs/export", get(handlers::export_audit_logs))
        .route("/api/logs/stats", get(handlers::get_audit_stats))
        .route("/api/logs/clear", delete(handlers::clear_audit_logs))
}

/// Full application: routes, pass-through fallback and the capture layer
pub fn app(state: AppState) -> Router {
    routes()
        .fallback(handlers::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), capture_request))
        .with_state(state)
}
