use crate::db::migrate::ensure_schema;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

/// Initialize the database on an open connection.
/// All schema creation goes through the migration module.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    ensure_schema(conn).map_err(|e| AppError::Schema(e.to_string()))
}

/// Open `path` and make sure the schema exists.
///
/// Any failure here is reported as `AppError::Schema`, which callers treat as fatal.
pub fn ensure_database(path: &str) -> AppResult<()> {
    let pool = DbPool::new(path).map_err(|e| AppError::Schema(e.to_string()))?;
    init_db(&pool.conn)
}
