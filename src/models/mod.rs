//! Data models for the audit recorder

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Audit Record
// ============================================================================

/// One persisted observation of an inbound call.
///
/// Records are created once by the capture layer and never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Store-assigned identifier, absent until the record is persisted
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "user")]
    pub actor: String,
    pub endpoint: String,
    pub method: String,
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(rename = "fullUrl", default)]
    pub full_url: Option<String>,
}

impl AuditRecord {
    pub fn new(
        actor: impl Into<String>,
        endpoint: impl Into<String>,
        method: impl Into<String>,
        full_url: Option<String>,
    ) -> Self {
        Self {
            id: None,
            actor: actor.into(),
            endpoint: endpoint.into(),
            method: method.into().to_uppercase(),
            timestamp: Some(Utc::now()),
            full_url,
        }
    }

    #[cfg(test)]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// "<endpoint> [<method>]" label shown by the dashboard
    pub fn display_endpoint(&self) -> String {
        format!("{} [{}]", self.endpoint, self.method)
    }
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-01-01T10:00:00.000Z`
pub fn iso_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Record fields that support distinct-value aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    Actor,
    Endpoint,
}

impl RecordField {
    /// Field name as persisted
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordField::Actor => "user",
            RecordField::Endpoint => "endpoint",
        }
    }

    pub fn value<'a>(&self, record: &'a AuditRecord) -> &'a str {
        match self {
            RecordField::Actor => &record.actor,
            RecordField::Endpoint => &record.endpoint,
        }
    }
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Filter parameters shared by list and export
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFilterParams {
    pub user: Option<String>,
    pub endpoint: Option<String>,
    pub method: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// GET /api/logs query string
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogListQuery {
    pub user: Option<String>,
    pub endpoint: Option<String>,
    pub method: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl LogListQuery {
    pub fn filter_params(&self) -> LogFilterParams {
        LogFilterParams {
            user: self.user.clone(),
            endpoint: self.endpoint.clone(),
            method: self.method.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// A list item: the stored record plus its display label
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecordView {
    #[serde(flatten)]
    pub record: AuditRecord,
    pub display_endpoint: String,
}

impl From<AuditRecord> for AuditRecordView {
    fn from(record: AuditRecord) -> Self {
        let display_endpoint = record.display_endpoint();
        Self {
            record,
            display_endpoint,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogPage {
    pub data: Vec<AuditRecordView>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogStats {
    pub total_logs: u64,
    pub unique_users: u64,
    pub unique_endpoints: u64,
}
