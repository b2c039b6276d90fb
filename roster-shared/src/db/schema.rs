/// Schema lifecycle for the records table
///
/// The store keeps a single table. Its version is tracked with SQLite's
/// `PRAGMA user_version`, which is also where existing databases carry their
/// version, so stores created elsewhere open cleanly as long as the version
/// matches.
///
/// - `ensure_schema` creates the table when absent and stamps the version.
///   It never drops anything.
/// - `drop_and_recreate_schema` is the one destructive upgrade path. It
///   throws away every record and must be called explicitly.
///
/// # Example
///
/// ```no_run
/// use roster_shared::db::pool::{create_pool, DatabaseConfig};
/// use roster_shared::db::schema::{ensure_schema, drop_and_recreate_schema};
/// use roster_shared::error::StoreError;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::for_path("roster.db")).await?;
///
/// match ensure_schema(&pool).await {
///     Ok(status) => println!("schema v{}", status.stored_version),
///     Err(StoreError::SchemaOutdated { .. }) => {
///         // Irreversible: every stored record is lost
///         drop_and_recreate_schema(&pool).await?;
///     }
///     Err(e) => return Err(e.into()),
/// }
/// # Ok(())
/// # }
/// ```

use crate::error::{StoreError, StoreResult};
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePool, Sqlite};
use tracing::{debug, info, warn};

/// Schema version written by this build
pub const SCHEMA_VERSION: i64 = 1;

/// Name of the records table
pub const RECORDS_TABLE: &str = "usuarios";

/// Table definition (on-disk contract, column names must not change)
pub const CREATE_RECORDS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS usuarios (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nombre TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    telefono TEXT,
    edad INTEGER,
    ciudad TEXT,
    genero TEXT,
    notificaciones INTEGER DEFAULT 1
)
"#;

/// Schema status information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaStatus {
    /// Whether the records table exists
    pub table_exists: bool,

    /// Version stamped in the database (0 = never stamped)
    pub stored_version: i64,

    /// Version this build expects
    pub expected_version: i64,

    /// Whether the table exists and carries the expected version
    pub is_up_to_date: bool,
}

/// Reads the current schema status without changing anything
pub async fn schema_status(pool: &SqlitePool) -> Result<SchemaStatus, sqlx::Error> {
    debug!("Checking schema status");

    let (table_count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
    )
    .bind(RECORDS_TABLE)
    .fetch_one(pool)
    .await?;

    let (stored_version,): (i64,) = sqlx::query_as("PRAGMA user_version")
        .fetch_one(pool)
        .await?;

    let table_exists = table_count > 0;

    debug!(table_exists, stored_version, "Schema status retrieved");

    Ok(SchemaStatus {
        table_exists,
        stored_version,
        expected_version: SCHEMA_VERSION,
        is_up_to_date: table_exists && stored_version == SCHEMA_VERSION,
    })
}

/// Creates the records table if absent and stamps the schema version
///
/// A database that was never stamped (version 0) is stamped with
/// `SCHEMA_VERSION`. Any other mismatch is reported, not repaired.
///
/// # Errors
///
/// - `StoreError::SchemaOutdated` when the stored version differs
/// - `StoreError::StorageFailure` when the database cannot be read or written
pub async fn ensure_schema(pool: &SqlitePool) -> StoreResult<SchemaStatus> {
    let status = schema_status(pool).await?;

    if status.stored_version != 0 && status.stored_version != SCHEMA_VERSION {
        warn!(
            found = status.stored_version,
            expected = SCHEMA_VERSION,
            "Schema version mismatch, refusing to open store"
        );
        return Err(StoreError::SchemaOutdated {
            found: status.stored_version,
            expected: SCHEMA_VERSION,
        });
    }

    if !status.table_exists {
        info!(table = RECORDS_TABLE, "Creating records table");
        sqlx::query(CREATE_RECORDS_TABLE).execute(pool).await?;
    }

    if status.stored_version == 0 {
        sqlx::query(&format!("PRAGMA user_version = {}", SCHEMA_VERSION))
            .execute(pool)
            .await?;
        debug!(version = SCHEMA_VERSION, "Stamped schema version");
    }

    Ok(SchemaStatus {
        table_exists: true,
        stored_version: SCHEMA_VERSION,
        expected_version: SCHEMA_VERSION,
        is_up_to_date: true,
    })
}

/// Drops the records table and recreates it empty (DESTROYS ALL RECORDS)
///
/// This is the only upgrade path between schema versions. No data is carried
/// over. The drop, the create and the version stamp run in one transaction.
pub async fn drop_and_recreate_schema(pool: &SqlitePool) -> StoreResult<SchemaStatus> {
    warn!(table = RECORDS_TABLE, "Dropping and recreating records table, all records will be lost");

    let mut tx = pool.begin().await?;

    sqlx::query("DROP TABLE IF EXISTS usuarios")
        .execute(&mut *tx)
        .await?;
    sqlx::query(CREATE_RECORDS_TABLE).execute(&mut *tx).await?;
    sqlx::query(&format!("PRAGMA user_version = {}", SCHEMA_VERSION))
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(version = SCHEMA_VERSION, "Records table recreated");

    Ok(SchemaStatus {
        table_exists: true,
        stored_version: SCHEMA_VERSION,
        expected_version: SCHEMA_VERSION,
        is_up_to_date: true,
    })
}

/// Creates the database file if it doesn't exist
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    debug!("Checking if database exists");

    if !Sqlite::database_exists(database_url).await? {
        info!("Database does not exist, creating it");
        Sqlite::create_database(database_url).await?;
        info!("Database created successfully");
    } else {
        debug!("Database already exists");
    }

    Ok(())
}

/// Deletes the database file (USE WITH CAUTION!)
///
/// Only meant for development and test environments.
pub async fn drop_database(database_url: &str) -> Result<(), sqlx::Error> {
    warn!("Dropping database: {}", database_url);

    if Sqlite::database_exists(database_url).await? {
        Sqlite::drop_database(database_url).await?;
        info!("Database dropped successfully");
    } else {
        debug!("Database does not exist, nothing to drop");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_statement_keeps_column_contract() {
        for column in [
            "id INTEGER PRIMARY KEY AUTOINCREMENT",
            "nombre TEXT NOT NULL",
            "email TEXT NOT NULL UNIQUE",
            "telefono TEXT",
            "edad INTEGER",
            "ciudad TEXT",
            "genero TEXT",
            "notificaciones INTEGER DEFAULT 1",
        ] {
            assert!(CREATE_RECORDS_TABLE.contains(column), "missing {}", column);
        }
    }

    #[test]
    fn test_schema_status_clone() {
        let status = SchemaStatus {
            table_exists: true,
            stored_version: 1,
            expected_version: SCHEMA_VERSION,
            is_up_to_date: true,
        };
        assert_eq!(status.clone(), status);
    }

    // Integration tests against real database files are in tests/schema_tests.rs
}
