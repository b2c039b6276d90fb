/// Database layer for the roster store
///
/// This module provides the SQLite connection pool and the schema lifecycle
/// for the records table.
///
/// # Modules
///
/// - `pool`: SQLite connection pool management with health checks
/// - `schema`: Table creation, version checks and the destructive reset
/// - The record model and its queries live in `models::record`
///
/// # Example
///
/// ```no_run
/// use roster_shared::db::pool::{create_pool, DatabaseConfig};
/// use roster_shared::db::schema::ensure_schema;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pool = create_pool(DatabaseConfig::for_path("roster.db")).await?;
///     ensure_schema(&pool).await?;
///     Ok(())
/// }
/// ```

pub mod pool;
pub mod schema;
