//! HTTP handlers module

mod logs;

pub use self::logs::*;

use axum::{extract::State, http::Uri, response::IntoResponse, Json};
use serde::Serialize;

use crate::db::AppState;
use crate::error::AppError;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Health check handler
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "audit-recorder".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// Fallback for paths with no handler. The call is still captured.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No handler for {}", uri.path()))
}

/// Generic success response
#[derive(Serialize)]
pub struct SuccessResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<u64>,
}

impl SuccessResponse {
    pub fn with_deleted(message: impl Into<String>, deleted: u64) -> Self {
        Self {
            message: message.into(),
            deleted: Some(deleted),
        }
    }
}
