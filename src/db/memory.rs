//! In-process record store
//!
//! Used when no MongoDB URL is configured and as the test store.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{FindRange, RecordStore, StoreError};
use crate::audit::filter::LogFilter;
use crate::models::{AuditRecord, RecordField};

#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<AuditRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert(&self, record: &AuditRecord) -> Result<String, StoreError> {
        let id = uuid::Uuid::new_v4().to_string();
        let mut stored = record.clone();
        stored.id = Some(id.clone());
        self.records.write().await.push(stored);
        Ok(id)
    }

    async fn find(
        &self,
        filter: &LogFilter,
        range: FindRange,
    ) -> Result<Vec<AuditRecord>, StoreError> {
        let records = self.records.read().await;

        // Newest insertion first, then a stable sort keeps that order for ties
        let mut matched: Vec<&AuditRecord> =
            records.iter().rev().filter(|r| filter.matches(r)).collect();
        matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let skip = usize::try_from(range.skip).unwrap_or(usize::MAX);
        let limit = range
            .limit
            .map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));

        Ok(matched.into_iter().skip(skip).take(limit).cloned().collect())
    }

    async fn count(&self, filter: &LogFilter) -> Result<u64, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|r| filter.matches(r)).count() as u64)
    }

    async fn count_all(&self) -> Result<u64, StoreError> {
        Ok(self.records.read().await.len() as u64)
    }

    async fn distinct_count(&self, field: RecordField) -> Result<u64, StoreError> {
        let records = self.records.read().await;
        let distinct: HashSet<&str> = records.iter().map(|r| field.value(r)).collect();
        Ok(distinct.len() as u64)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut records = self.records.write().await;
        let deleted = records.len() as u64;
        records.clear();
        Ok(deleted)
    }
}
