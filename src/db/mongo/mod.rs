//! MongoDB database module

mod audit_logs;

use mongodb::bson::doc;
use mongodb::{Client, Database, IndexModel};

use crate::config::Config;

/// Collection holding audit records
pub const AUDIT_COLLECTION: &str = "apilogs";

/// MongoDB database wrapper
#[derive(Clone)]
pub struct MongoDb {
    db: Database,
}

impl MongoDb {
    /// Connect to MongoDB database
    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        let url = config
            .database
            .mongodb_url
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("MongoDB URL not configured"))?;

        tracing::info!("Connecting to MongoDB...");

        let client = Client::with_uri_str(url).await?;
        let db = client.database(&config.database.database_name);

        // Verify connection
        db.run_command(doc! { "ping": 1 }, None).await?;

        tracing::info!("MongoDB connected successfully");

        let mongo = Self { db };
        if let Err(e) = mongo.ensure_indexes().await {
            tracing::warn!("Failed to create audit log indexes (non-fatal): {}", e);
        }

        Ok(mongo)
    }

    /// Get the database handle
    pub fn db(&self) -> &Database {
        &self.db
    }

    async fn ensure_indexes(&self) -> Result<(), mongodb::error::Error> {
        let collection = self.db.collection::<mongodb::bson::Document>(AUDIT_COLLECTION);

        let indexes = ["user", "endpoint", "method"]
            .into_iter()
            .map(|field| IndexModel::builder().keys(doc! { field: 1 }).build())
            .chain(std::iter::once(
                IndexModel::builder().keys(doc! { "timestamp": -1 }).build(),
            ))
            .collect::<Vec<_>>();

        collection.create_indexes(indexes, None).await?;
        tracing::debug!("Audit log indexes ensured");

        Ok(())
    }
}
