//! SQLite connection wrapper (lightweight for CLI usage).
//!
//! One `DbPool` is opened per logical operation and closed when dropped.

use crate::errors::AppResult;
use rusqlite::Connection;
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        Ok(Self { conn })
    }

    /// Helper to execute a closure inside a transaction.
    /// The transaction is committed only if `func` succeeds.
    pub fn with_tx<F, T>(&mut self, func: F) -> AppResult<T>
    where
        F: FnOnce(&rusqlite::Transaction<'_>) -> AppResult<T>,
    {
        let tx = self.conn.transaction()?;
        let out = func(&tx)?;
        tx.commit()?;
        Ok(out)
    }
}
