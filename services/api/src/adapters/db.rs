//! services/api/src/adapters/db.rs
//!
//! This module contains the Postgres adapter, a concrete implementation of the
//! `BlobStore` port from the `core` crate. Each blob is one row of the `blobs`
//! table, keyed by name.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use study_pack_core::ports::{BlobStore, PortError, PortResult};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `BlobStore` port.
#[derive(Clone)]
pub struct DbBlobAdapter {
    pool: PgPool,
}

impl DbBlobAdapter {
    /// Creates a new `DbBlobAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct BlobRecord {
    value: String,
}

//=========================================================================================
// `BlobStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl BlobStore for DbBlobAdapter {
    async fn read(&self, key: &str) -> PortResult<Option<String>> {
        let record = sqlx::query_as::<_, BlobRecord>(
            "SELECT value FROM blobs WHERE key = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(record.map(|r| r.value))
    }

    async fn write(&self, key: &str, value: &str) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO blobs (key, value, updated_at) VALUES ($1, $2, now()) \
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = now()",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }
}
