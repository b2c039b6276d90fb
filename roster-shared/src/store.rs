/// Record store
///
/// `Store` is the durable single-table persistence component. It owns a
/// connection pool and checks a connection out for each operation, so no
/// caller ever holds a database handle. Every write is a single autocommit
/// statement and is durable when the call returns.
///
/// Opening a store creates the table when it is missing. It never migrates
/// data: a version mismatch fails with `StoreError::SchemaOutdated` and the
/// caller decides whether to run `Store::reset_destroying_all_records`.
///
/// # Example
///
/// ```no_run
/// use roster_shared::db::pool::DatabaseConfig;
/// use roster_shared::models::record::NewRecord;
/// use roster_shared::store::Store;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Store::open(DatabaseConfig::for_path("roster.db")).await?;
///
/// let id = store.create(NewRecord::new("Ana", "ana@example.com").city("Lima")).await?;
/// let record = store.read_by_id(id).await?;
/// assert_eq!(record.name, "Ana");
///
/// store.delete(id).await?;
/// # Ok(())
/// # }
/// ```

use crate::db::pool::{create_pool, DatabaseConfig};
use crate::db::schema::{self, SchemaStatus};
use crate::error::{StoreError, StoreResult};
use crate::models::record::{NewRecord, Record};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

/// Handle to the records table
///
/// Cloning is cheap; clones share the same pool.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Opens (or creates) the store described by `config`
    ///
    /// # Errors
    ///
    /// - `StorageFailure` if the database cannot be opened
    /// - `SchemaOutdated` if the stored schema version differs
    pub async fn open(config: DatabaseConfig) -> StoreResult<Self> {
        let pool = create_pool(config).await?;
        Self::from_pool(pool).await
    }

    /// Wraps an existing pool, creating the table if needed
    pub async fn from_pool(pool: SqlitePool) -> StoreResult<Self> {
        let status = schema::ensure_schema(&pool).await?;
        info!(version = status.stored_version, "Record store ready");
        Ok(Self { pool })
    }

    /// Opens the store even if its schema is outdated, without touching it
    ///
    /// Every operation other than `reset_destroying_all_records` may fail on
    /// such a store. Meant for callers that inspect `schema_status` first.
    pub async fn open_unchecked(config: DatabaseConfig) -> StoreResult<Self> {
        let pool = create_pool(config).await?;
        Ok(Self { pool })
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Current schema status
    pub async fn schema_status(&self) -> StoreResult<SchemaStatus> {
        Ok(schema::schema_status(&self.pool).await?)
    }

    /// Drops every record and recreates the table at the current version
    ///
    /// Irreversible. This is the only way past `SchemaOutdated`.
    pub async fn reset_destroying_all_records(&self) -> StoreResult<SchemaStatus> {
        schema::drop_and_recreate_schema(&self.pool).await
    }

    /// Inserts a record and returns its new id
    pub async fn create(&self, record: NewRecord) -> StoreResult<i64> {
        debug!(email = %record.email, "Creating record");

        match Record::create(&self.pool, record).await {
            Ok(id) => {
                info!(id, "Record created");
                Ok(id)
            }
            Err(e) => {
                warn!(error = %e, "Record create failed");
                Err(e)
            }
        }
    }

    /// Every record, ordered by name ascending
    ///
    /// An empty table yields an empty vector.
    pub async fn read_all(&self) -> StoreResult<Vec<Record>> {
        let records = Record::list_by_name(&self.pool).await?;
        debug!(count = records.len(), "Loaded all records");
        Ok(records)
    }

    /// The record with `id`
    ///
    /// # Errors
    ///
    /// `NotFound` if no record has this id
    pub async fn read_by_id(&self, id: i64) -> StoreResult<Record> {
        Record::find_by_id(&self.pool, id)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    /// Overwrites every field of the stored record with `record.id`
    ///
    /// # Errors
    ///
    /// - `NotFound` if no record has this id
    /// - `ConstraintViolation` on blank name/email or a taken email
    pub async fn update(&self, record: &Record) -> StoreResult<()> {
        debug!(id = record.id, "Updating record");

        if Record::update(&self.pool, record).await? {
            info!(id = record.id, "Record updated");
            Ok(())
        } else {
            warn!(id = record.id, "Update matched no record");
            Err(StoreError::NotFound(record.id))
        }
    }

    /// Deletes the record with `id`
    ///
    /// Deleting an id that does not exist is an error, not a no-op.
    ///
    /// # Errors
    ///
    /// `NotFound` if no record has this id
    pub async fn delete(&self, id: i64) -> StoreResult<bool> {
        debug!(id, "Deleting record");

        if Record::delete(&self.pool, id).await? {
            info!(id, "Record deleted");
            Ok(true)
        } else {
            warn!(id, "Delete matched no record");
            Err(StoreError::NotFound(id))
        }
    }

    /// Records whose name contains `fragment` (case-insensitive), by name
    pub async fn search_by_name(&self, fragment: &str) -> StoreResult<Vec<Record>> {
        let records = Record::search_by_name(&self.pool, fragment).await?;
        debug!(fragment, matches = records.len(), "Searched records by name");
        Ok(records)
    }

    /// Total number of records
    pub async fn count(&self) -> StoreResult<i64> {
        Record::count(&self.pool).await
    }

    /// Closes the pool, releasing the database file
    pub async fn close(self) {
        crate::db::pool::close_pool(self.pool).await;
    }
}
