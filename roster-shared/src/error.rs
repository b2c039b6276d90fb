/// Store error types
///
/// Every Store operation returns a `StoreResult<T>`. Callers can branch on the
/// error kind instead of parsing a message string, and nothing in the store
/// retries on its own.
///
/// # Example
///
/// ```no_run
/// use roster_shared::error::StoreError;
/// use roster_shared::store::Store;
///
/// # async fn example(store: Store) {
/// match store.delete(42).await {
///     Ok(_) => println!("deleted"),
///     Err(StoreError::NotFound(id)) => println!("no record {}", id),
///     Err(e) => println!("store failed: {}", e),
/// }
/// # }
/// ```

use sqlx::error::ErrorKind;

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the record store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Uniqueness or required-field violation on write
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// No record with this id
    #[error("Record not found: {0}")]
    NotFound(i64),

    /// Engine-level I/O or statement error
    #[error("Storage failure: {0}")]
    StorageFailure(#[source] sqlx::Error),

    /// The on-disk schema version does not match this build
    ///
    /// Resolve with `db::schema::drop_and_recreate_schema`, which discards
    /// every stored record.
    #[error("Schema version {found} does not match expected version {expected}")]
    SchemaOutdated { found: i64, expected: i64 },
}

impl StoreError {
    /// Stable machine-readable code for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::ConstraintViolation(_) => "constraint_violation",
            StoreError::NotFound(_) => "not_found",
            StoreError::StorageFailure(_) => "storage_failure",
            StoreError::SchemaOutdated { .. } => "schema_outdated",
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                ErrorKind::UniqueViolation => {
                    // SQLite only reports "UNIQUE constraint failed: usuarios.email"
                    let message = if db_err.message().contains("email") {
                        "Email already exists".to_string()
                    } else {
                        db_err.message().to_string()
                    };
                    return StoreError::ConstraintViolation(message);
                }
                ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                    return StoreError::ConstraintViolation(db_err.message().to_string());
                }
                _ => {}
            }
        }

        StoreError::StorageFailure(err)
    }
}
