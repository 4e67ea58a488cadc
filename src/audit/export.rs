//! CSV export of the full filtered result set

use super::filter::LogFilter;
use crate::db::{FindRange, RecordStore};
use crate::error::AppError;
use crate::models::{iso_timestamp, AuditRecord};

pub const CSV_HEADER: [&str; 5] = ["User", "Endpoint", "Method", "Timestamp", "Full URL"];

/// Every record matching `filter`, newest first, encoded as CSV
pub async fn export_csv(store: &dyn RecordStore, filter: &LogFilter) -> Result<Vec<u8>, AppError> {
    let records = store.find(filter, FindRange::all()).await?;
    encode_csv(&records)
}

pub fn encode_csv(records: &[AuditRecord]) -> Result<Vec<u8>, AppError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(CSV_HEADER)
        .map_err(|e| AppError::Export(format!("CSV header error: {}", e)))?;

    for record in records {
        let timestamp = record
            .timestamp
            .as_ref()
            .map(iso_timestamp)
            .unwrap_or_default();
        wtr.write_record([
            record.actor.as_str(),
            record.endpoint.as_str(),
            record.method.as_str(),
            timestamp.as_str(),
            record.full_url.as_deref().unwrap_or(""),
        ])
        .map_err(|e| AppError::Export(format!("CSV write error: {}", e)))?;
    }

    wtr.into_inner()
        .map_err(|e| AppError::Export(format!("CSV finalize error: {}", e)))
}
