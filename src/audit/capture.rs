//! Capture middleware - records every inbound call outside the query surface
//!
//! Capture is attempted before the wrapped handler runs. Failures and
//! timeouts are logged and swallowed; the request always proceeds.

use std::time::Duration;

use axum::{
    extract::{OriginalUri, Request, State},
    middleware::Next,
    response::Response,
};

use super::{resolve_actor, LOGS_PATH};
use crate::db::{AppState, StoreError};
use crate::models::AuditRecord;

pub async fn capture_request(State(state): State<AppState>, req: Request, next: Next) -> Response {
    // Nested routers rewrite the URI, the original target is what gets audited
    let uri = req
        .extensions()
        .get::<OriginalUri>()
        .map(|original| original.0.clone())
        .unwrap_or_else(|| req.uri().clone());

    if is_query_surface(uri.path()) {
        return next.run(req).await;
    }

    let actor = resolve_actor(uri.query(), req.headers());
    let full_url = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    let record = AuditRecord::new(actor, uri.path(), req.method().as_str(), Some(full_url));

    let timeout = Duration::from_millis(state.audit.capture_timeout_ms);
    let inserted = tokio::time::timeout(timeout, state.store.insert(&record))
        .await
        .unwrap_or_else(|_| {
            Err(StoreError::Unavailable(format!(
                "insert timed out after {}ms",
                timeout.as_millis()
            )))
        });

    match inserted {
        Ok(id) => {
            tracing::debug!(
                "Captured {} {} as {} ({})",
                record.method,
                record.endpoint,
                record.actor,
                id
            );
        }
        Err(e) => {
            tracing::warn!("Log error for {} {}: {}", record.method, record.endpoint, e);
        }
    }

    next.run(req).await
}

fn is_query_surface(path: &str) -> bool {
    path.starts_with(LOGS_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_surface_prefix() {
        assert!(is_query_surface("/api/logs"));
        assert!(is_query_surface("/api/logs/export"));
        assert!(is_query_surface("/api/logs/stats"));
        assert!(!is_query_surface("/api/users"));
        assert!(!is_query_surface("/logs"));
    }
}
