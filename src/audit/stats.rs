//! Global log statistics

use crate::db::{RecordStore, StoreError};
use crate::models::{LogStats, RecordField};

/// Unfiltered totals: record count, distinct actors, distinct endpoints
pub async fn collect_stats(store: &dyn RecordStore) -> Result<LogStats, StoreError> {
    let (total_logs, unique_users, unique_endpoints) = tokio::try_join!(
        store.count_all(),
        store.distinct_count(RecordField::Actor),
        store.distinct_count(RecordField::Endpoint),
    )?;

    Ok(LogStats {
        total_logs,
        unique_users,
        unique_endpoints,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::AuditRecord;

    #[tokio::test]
    async fn test_distinct_counts() {
        let store = MemoryStore::new();
        for (actor, endpoint) in [("alice", "/a"), ("bob", "/b"), ("alice", "/a")] {
            store
                .insert(&AuditRecord::new(actor, endpoint, "GET", None))
                .await
                .unwrap();
        }

        let stats = collect_stats(&store).await.unwrap();
        assert_eq!(
            stats,
            LogStats {
                total_logs: 3,
                unique_users: 2,
                unique_endpoints: 2,
            }
        );
    }

    #[tokio::test]
    async fn test_empty_store() {
        let stats = collect_stats(&MemoryStore::new()).await.unwrap();
        assert_eq!(stats.total_logs, 0);
        assert_eq!(stats.unique_users, 0);
        assert_eq!(stats.unique_endpoints, 0);
    }
}
