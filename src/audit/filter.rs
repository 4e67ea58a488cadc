//! Filter compiler
//!
//! Turns the list/export query parameters into a [`LogFilter`]. Every filter
//! produced here excludes the query surface's own endpoint, so no read path
//! can surface the logger's log.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

use super::{ANONYMOUS_ACTOR, LOGS_PATH};
use crate::models::{AuditRecord, LogFilterParams};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid {field}: '{value}' is not a recognized date or date-time")]
    InvalidDate { field: &'static str, value: String },
}

/// Compiled predicate over audit records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFilter {
    actor: Option<String>,
    endpoint: Option<String>,
    method: Option<String>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    excluded_endpoint: &'static str,
}

impl LogFilter {
    /// Compile query parameters. Empty or whitespace-only values count as
    /// absent; other values are used as given.
    pub fn compile(params: &LogFilterParams) -> Result<Self, FilterError> {
        let actor = non_empty(&params.user)
            .filter(|user| *user != ANONYMOUS_ACTOR)
            .map(str::to_string);
        let endpoint = non_empty(&params.endpoint).map(str::to_string);
        let method = non_empty(&params.method).map(str::to_uppercase);

        let start = non_empty(&params.start_date)
            .map(|v| parse_date(v.trim(), "startDate"))
            .transpose()?;
        let end = non_empty(&params.end_date)
            .map(|v| parse_date(v.trim(), "endDate"))
            .transpose()?;

        Ok(Self {
            actor,
            endpoint,
            method,
            start,
            end,
            ..Self::unfiltered()
        })
    }

    /// Filter with no user constraints
    pub fn unfiltered() -> Self {
        Self {
            actor: None,
            endpoint: None,
            method: None,
            start: None,
            end: None,
            excluded_endpoint: LOGS_PATH,
        }
    }

    /// Case-insensitive substring required in the actor
    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }

    /// Case-insensitive substring required in the endpoint
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Exact, upper-cased method
    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    /// Endpoint that never matches, whatever else was requested
    pub fn excluded_endpoint(&self) -> &'static str {
        self.excluded_endpoint
    }

    pub fn matches(&self, record: &AuditRecord) -> bool {
        if record.endpoint == self.excluded_endpoint {
            return false;
        }
        if let Some(actor) = &self.actor {
            if !contains_ignore_case(&record.actor, actor) {
                return false;
            }
        }
        if let Some(endpoint) = &self.endpoint {
            if !contains_ignore_case(&record.endpoint, endpoint) {
                return false;
            }
        }
        if let Some(method) = &self.method {
            if record.method != *method {
                return false;
            }
        }
        if self.start.is_some() || self.end.is_some() {
            let Some(ts) = record.timestamp else {
                return false;
            };
            if self.start.is_some_and(|start| ts < start) {
                return false;
            }
            if self.end.is_some_and(|end| ts > end) {
                return false;
            }
        }
        true
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Parse a calendar date or date-time. Values without an offset are UTC.
fn parse_date(value: &str, field: &'static str) -> Result<DateTime<Utc>, FilterError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Some(midnight) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }

    Err(FilterError::InvalidDate {
        field,
        value: value.to_string(),
    })
}
