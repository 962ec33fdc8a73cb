use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Create the `water_intake` table.
fn create_water_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS water_intake (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            date         TEXT NOT NULL,
            quantity     INTEGER NOT NULL,
            description  TEXT NULL,
            created_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_water_intake_date ON water_intake(date);
        "#,
    )?;
    Ok(())
}

/// Create the `walking_activity` table.
fn create_walking_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS walking_activity (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            date         TEXT NOT NULL,
            steps        INTEGER NOT NULL,
            distance     REAL NOT NULL,
            description  TEXT NULL,
            created_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_walking_activity_date ON walking_activity(date);
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
pub fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Public entry point: make sure every table exists. Safe to call repeatedly.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;
    create_water_table(conn)?;
    create_walking_table(conn)?;
    Ok(())
}
