//! Audit log operations (MongoDB)
//!
//! Collection: `apilogs`
//! Fields: `user`, `endpoint`, `method`, `timestamp` (BSON datetime), `fullUrl`

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, DateTime as BsonDateTime, Document};
use mongodb::options::FindOptions;

use super::{MongoDb, AUDIT_COLLECTION};
use crate::audit::filter::LogFilter;
use crate::db::{FindRange, RecordStore, StoreError};
use crate::models::{AuditRecord, RecordField};

impl MongoDb {
    fn audit_logs(&self) -> mongodb::Collection<Document> {
        self.db().collection::<Document>(AUDIT_COLLECTION)
    }
}

#[async_trait]
impl RecordStore for MongoDb {
    async fn insert(&self, record: &AuditRecord) -> Result<String, StoreError> {
        let result = self
            .audit_logs()
            .insert_one(record_to_document(record), None)
            .await?;

        Ok(match result.inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        })
    }

    async fn find(
        &self,
        filter: &LogFilter,
        range: FindRange,
    ) -> Result<Vec<AuditRecord>, StoreError> {
        let options = FindOptions::builder()
            .sort(doc! { "timestamp": -1, "_id": -1 })
            .skip(range.skip)
            .limit(range.limit.map(|l| l as i64))
            .build();

        let mut cursor = self
            .audit_logs()
            .find(filter_document(filter), options)
            .await?;

        let mut records = Vec::new();
        while let Some(doc) = cursor.try_next().await? {
            records.push(record_from_document(doc));
        }

        Ok(records)
    }

    async fn count(&self, filter: &LogFilter) -> Result<u64, StoreError> {
        let count = self
            .audit_logs()
            .count_documents(filter_document(filter), None)
            .await?;
        Ok(count)
    }

    async fn count_all(&self) -> Result<u64, StoreError> {
        let count = self.audit_logs().count_documents(doc! {}, None).await?;
        Ok(count)
    }

    async fn distinct_count(&self, field: RecordField) -> Result<u64, StoreError> {
        let values = self
            .audit_logs()
            .distinct(field.as_str(), None, None)
            .await?;
        Ok(values.len() as u64)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let result = self.audit_logs().delete_many(doc! {}, None).await?;
        Ok(result.deleted_count)
    }
}

pub fn record_to_document(record: &AuditRecord) -> Document {
    let mut doc = doc! {
        "user": record.actor.as_str(),
        "endpoint": record.endpoint.as_str(),
        "method": record.method.as_str(),
    };
    if let Some(ts) = record.timestamp {
        doc.insert("timestamp", BsonDateTime::from_millis(ts.timestamp_millis()));
    }
    if let Some(url) = &record.full_url {
        doc.insert("fullUrl", url.as_str());
    }
    doc
}

/// Decode a stored document. Every document `count` sees must come back from
/// `find`, so missing or null text fields decode as empty strings.
pub fn record_from_document(doc: Document) -> AuditRecord {
    let id = match doc.get("_id") {
        Some(Bson::ObjectId(oid)) => Some(oid.to_hex()),
        Some(other) => Some(other.to_string()),
        None => None,
    };
    let timestamp = doc
        .get_datetime("timestamp")
        .ok()
        .and_then(|dt| DateTime::<Utc>::from_timestamp_millis(dt.timestamp_millis()));

    AuditRecord {
        id,
        actor: text_field(&doc, "user"),
        endpoint: text_field(&doc, "endpoint"),
        method: text_field(&doc, "method"),
        timestamp,
        full_url: doc.get_str("fullUrl").ok().map(str::to_string),
    }
}

fn text_field(doc: &Document, name: &str) -> String {
    match doc.get(name) {
        Some(Bson::String(value)) => value.clone(),
        None | Some(Bson::Null) => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Translate a compiled filter into a MongoDB query document
pub fn filter_document(filter: &LogFilter) -> Document {
    let mut endpoint = doc! { "$ne": filter.excluded_endpoint() };
    if let Some(pattern) = filter.endpoint() {
        endpoint.insert("$regex", regex::escape(pattern));
        endpoint.insert("$options", "i");
    }

    let mut query = doc! { "endpoint": endpoint };

    if let Some(actor) = filter.actor() {
        query.insert(
            "user",
            doc! { "$regex": regex::escape(actor), "$options": "i" },
        );
    }
    if let Some(method) = filter.method() {
        query.insert("method", method);
    }
    if filter.start().is_some() || filter.end().is_some() {
        let mut range = doc! {};
        if let Some(start) = filter.start() {
            range.insert("$gte", BsonDateTime::from_millis(start.timestamp_millis()));
        }
        if let Some(end) = filter.end() {
            range.insert("$lte", BsonDateTime::from_millis(end.timestamp_millis()));
        }
        query.insert("timestamp", range);
    }

    query
}
