//! Query engine - filtered, paginated listing newest first

use super::filter::LogFilter;
use crate::db::{FindRange, RecordStore, StoreError};
use crate::models::{AuditRecordView, LogPage};

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_LIMIT: u64 = 10;
const MAX_LIMIT: u64 = 100;

/// Clamped page/limit pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Pagination {
    /// Page is at least 1 and limit is within [1, 100]. Values that are
    /// not integers fall back to the defaults (page 1, limit 10). Page is
    /// capped so the skip offset still fits in an `i64`.
    pub fn from_params(page: Option<&str>, limit: Option<&str>) -> Self {
        let limit = parse_int(limit).map_or(DEFAULT_LIMIT, |l| {
            l.clamp(1, MAX_LIMIT as i64) as u64
        });
        let page = parse_int(page)
            .map_or(DEFAULT_PAGE, |p| p.max(1) as u64)
            .min(i64::MAX as u64 / limit);
        Self { page, limit }
    }

    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

fn parse_int(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.trim().parse::<i64>().ok())
}

/// Fetch one page of records matching `filter`
pub async fn list_logs(
    store: &dyn RecordStore,
    filter: &LogFilter,
    pagination: Pagination,
) -> Result<LogPage, StoreError> {
    let records = store
        .find(filter, FindRange::page(pagination.skip(), pagination.limit))
        .await?;
    let total = store.count(filter).await?;
    let total_pages = pagination.total_pages(total);

    Ok(LogPage {
        data: records.into_iter().map(AuditRecordView::from).collect(),
        total,
        page: pagination.page,
        limit: pagination.limit,
        total_pages,
        has_next_page: pagination.page < total_pages,
        has_prev_page: pagination.page > 1,
    })
}
