//! Database module - record store contract and adapters

pub mod memory;
pub mod mongo;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::audit::filter::LogFilter;
use crate::config::{AuditConfig, Config};
use crate::models::{AuditRecord, RecordField};

pub use self::memory::MemoryStore;
pub use self::mongo::MongoDb;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Window applied to a sorted find
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindRange {
    pub skip: u64,
    /// `None` returns every match
    pub limit: Option<u64>,
}

impl FindRange {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn page(skip: u64, limit: u64) -> Self {
        Self {
            skip,
            limit: Some(limit),
        }
    }
}

/// Durable collection of audit records.
///
/// `find` results are ordered by timestamp descending; ties resolve newest
/// insertion first and records without a timestamp sort last.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a new record, returning its store id
    async fn insert(&self, record: &AuditRecord) -> Result<String, StoreError>;

    async fn find(
        &self,
        filter: &LogFilter,
        range: FindRange,
    ) -> Result<Vec<AuditRecord>, StoreError>;

    async fn count(&self, filter: &LogFilter) -> Result<u64, StoreError>;

    /// Unfiltered record count
    async fn count_all(&self) -> Result<u64, StoreError>;

    /// Cardinality of the distinct values stored in `field`
    async fn distinct_count(&self, field: RecordField) -> Result<u64, StoreError>;

    /// Remove every record, returning how many were deleted
    async fn delete_all(&self) -> Result<u64, StoreError>;
}

/// Application state shared by handlers and the capture layer
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub audit: AuditConfig,
    pub start_time: std::time::Instant,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let store: Arc<dyn RecordStore> = match config.database.mongodb_url {
            Some(_) => Arc::new(MongoDb::connect(config).await?),
            None => {
                tracing::warn!("MongoDB URL not configured, using in-memory store");
                Arc::new(MemoryStore::new())
            }
        };

        Ok(Self::with_store(store, config.audit.clone()))
    }

    pub fn with_store(store: Arc<dyn RecordStore>, audit: AuditConfig) -> Self {
        Self {
            store,
            audit,
            start_time: std::time::Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
