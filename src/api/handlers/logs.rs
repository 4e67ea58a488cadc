//! Audit log handlers

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};

use super::SuccessResponse;
use crate::audit::export::export_csv;
use crate::audit::query::{list_logs, Pagination};
use crate::audit::stats::collect_stats;
use crate::audit::LogFilter;
use crate::db::AppState;
use crate::error::AppError;
use crate::models::{LogFilterParams, LogListQuery};

/// GET /api/logs - Filtered, paginated audit logs
pub async fn list_audit_logs(
    State(state): State<AppState>,
    Query(query): Query<LogListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = LogFilter::compile(&query.filter_params())?;
    let pagination = Pagination::from_params(query.page.as_deref(), query.limit.as_deref());

    let page = list_logs(state.store.as_ref(), &filter, pagination).await?;

    Ok(Json(page))
}

/// GET /api/logs/export - Filtered audit logs as a CSV download
pub async fn export_audit_logs(
    State(state): State<AppState>,
    Query(params): Query<LogFilterParams>,
) -> Result<impl IntoResponse, AppError> {
    let filter = LogFilter::compile(&params)?;
    let csv_data = export_csv(state.store.as_ref(), &filter).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"logs.csv\""),
        ],
        csv_data,
    ))
}

/// GET /api/logs/stats - Global totals
pub async fn get_audit_stats(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let stats = collect_stats(state.store.as_ref()).await?;
    Ok(Json(stats))
}

/// DELETE /api/logs/clear - Remove every audit log
pub async fn clear_audit_logs(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state.store.delete_all().await?;
    tracing::info!("Cleared {} audit logs", deleted);

    Ok(Json(SuccessResponse::with_deleted("All logs cleared", deleted)))
}
