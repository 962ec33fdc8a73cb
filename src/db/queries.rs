//! Record Store: raw CRUD and aggregate queries over the two habit tables.
//!
//! Table and column names come only from the static `HabitProfile`s, never from
//! user input, so formatting them into SQL is safe. Values always go through
//! bound parameters. Field invariants are checked by the caller.

use crate::errors::{AppError, AppResult};
use crate::models::habit::{HabitKind, MetricColumn};
use crate::models::record::{Metrics, NewRecord, Record};
use crate::models::stats::{Aggregate, DayTotals};
use crate::utils::date;
use chrono::{Local, NaiveDate};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};

/// Date filter for aggregate queries (bounds inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRange {
    All,
    Since(NaiveDate),
    Between(NaiveDate, NaiveDate),
}

impl DateRange {
    fn where_clause(&self) -> (&'static str, Vec<Value>) {
        match self {
            DateRange::All => ("", Vec::new()),
            DateRange::Since(from) => (
                "WHERE date >= ?1",
                vec![Value::Text(date::format_store(from))],
            ),
            DateRange::Between(from, to) => (
                "WHERE date >= ?1 AND date <= ?2",
                vec![
                    Value::Text(date::format_store(from)),
                    Value::Text(date::format_store(to)),
                ],
            ),
        }
    }
}

fn column(kind: HabitKind, col: MetricColumn) -> AppResult<&'static str> {
    col.name(kind).ok_or_else(|| {
        AppError::Other(format!(
            "{} has no secondary metric column",
            kind.profile().table
        ))
    })
}

fn now_stamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

fn parse_date_col(raw: String) -> Result<NaiveDate> {
    date::parse_store(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(raw)),
        )
    })
}

fn select_columns(kind: HabitKind) -> &'static str {
    match kind {
        HabitKind::Water => "id, date, quantity, description, created_at",
        HabitKind::Walking => "id, date, steps, distance, description, created_at",
    }
}

pub fn map_row(kind: HabitKind, row: &Row) -> Result<Record> {
    let metrics = match kind {
        HabitKind::Water => Metrics::Water {
            glasses: row.get("quantity")?,
        },
        HabitKind::Walking => Metrics::Walking {
            steps: row.get("steps")?,
            distance_km: row.get("distance")?,
        },
    };

    Ok(Record {
        id: row.get("id")?,
        date: parse_date_col(row.get("date")?)?,
        metrics,
        description: row.get("description")?,
        created_at: row.get("created_at")?,
    })
}

fn map_day(row: &Row) -> Result<DayTotals> {
    Ok(DayTotals {
        date: parse_date_col(row.get(0)?)?,
        entries: row.get(1)?,
        primary: row.get(2)?,
        secondary: row.get(3)?,
    })
}

/// `TOTAL(secondary)` expression, or a constant for habits without one.
fn secondary_sum(kind: HabitKind) -> String {
    match kind.profile().secondary_column {
        Some(c) => format!("TOTAL({})", c),
        None => "0.0".to_string(),
    }
}

/// Insert a record, stamping `created_at`. Returns the new id.
pub fn insert_record(conn: &Connection, rec: &NewRecord) -> AppResult<i64> {
    let date_str = date::format_store(&rec.date);
    let created_at = now_stamp();

    match rec.metrics {
        Metrics::Water { glasses } => {
            conn.execute(
                "INSERT INTO water_intake (date, quantity, description, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![date_str, glasses, rec.description, created_at],
            )?;
        }
        Metrics::Walking { steps, distance_km } => {
            conn.execute(
                "INSERT INTO walking_activity (date, steps, distance, description, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![date_str, steps, distance_km, rec.description, created_at],
            )?;
        }
    }

    Ok(conn.last_insert_rowid())
}

/// Fetch one record, or `RecordNotFound`.
pub fn get_record(conn: &Connection, kind: HabitKind, id: i64) -> AppResult<Record> {
    let profile = kind.profile();
    let sql = format!(
        "SELECT {} FROM {} WHERE id = ?1",
        select_columns(kind),
        profile.table
    );

    conn.query_row(&sql, [id], |row| map_row(kind, row))
        .optional()?
        .ok_or(AppError::RecordNotFound {
            table: profile.table,
            id,
        })
}

fn list_with_limit(conn: &Connection, kind: HabitKind, limit: Option<u32>) -> AppResult<Vec<Record>> {
    let profile = kind.profile();
    let mut sql = format!(
        "SELECT {} FROM {} ORDER BY date DESC, created_at DESC, id DESC",
        select_columns(kind),
        profile.table
    );
    if limit.is_some() {
        sql.push_str(" LIMIT ?1");
    }

    let values: Vec<Value> = limit.map(|n| Value::Integer(n as i64)).into_iter().collect();

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values), |row| map_row(kind, row))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Every record, newest date first, then newest insertion first.
pub fn list_records(conn: &Connection, kind: HabitKind) -> AppResult<Vec<Record>> {
    list_with_limit(conn, kind, None)
}

/// The `limit` most recent records, same ordering as `list_records`.
pub fn list_recent(conn: &Connection, kind: HabitKind, limit: u32) -> AppResult<Vec<Record>> {
    list_with_limit(conn, kind, Some(limit))
}

/// Replace all user fields of record `id`. Returns rows affected (0 or 1).
pub fn update_record(conn: &Connection, id: i64, rec: &NewRecord) -> AppResult<usize> {
    let date_str = date::format_store(&rec.date);

    let n = match rec.metrics {
        Metrics::Water { glasses } => conn.execute(
            "UPDATE water_intake
             SET date = ?1, quantity = ?2, description = ?3
             WHERE id = ?4",
            params![date_str, glasses, rec.description, id],
        )?,
        Metrics::Walking { steps, distance_km } => conn.execute(
            "UPDATE walking_activity
             SET date = ?1, steps = ?2, distance = ?3, description = ?4
             WHERE id = ?5",
            params![date_str, steps, distance_km, rec.description, id],
        )?,
    };

    Ok(n)
}

/// Delete record `id`. Returns rows affected (0 or 1).
pub fn delete_record(conn: &Connection, kind: HabitKind, id: i64) -> AppResult<usize> {
    let sql = format!("DELETE FROM {} WHERE id = ?1", kind.profile().table);
    Ok(conn.execute(&sql, [id])?)
}

/// Sum of `col` over the rows of `day` (0 when there are none).
pub fn sum_by_date(
    conn: &Connection,
    kind: HabitKind,
    col: MetricColumn,
    day: &NaiveDate,
) -> AppResult<f64> {
    let sql = format!(
        "SELECT TOTAL({}) FROM {} WHERE date = ?1",
        column(kind, col)?,
        kind.profile().table
    );
    Ok(conn.query_row(&sql, [date::format_store(day)], |row| row.get(0))?)
}

/// `{count, sum(primary), sum(secondary)}` over `range`.
pub fn aggregate(conn: &Connection, kind: HabitKind, range: DateRange) -> AppResult<Aggregate> {
    let profile = kind.profile();
    let (filter, values) = range.where_clause();
    let sql = format!(
        "SELECT COUNT(*), COALESCE(SUM({}), 0), {} FROM {} {}",
        profile.primary_column,
        secondary_sum(kind),
        profile.table,
        filter
    );

    let agg = conn.query_row(&sql, params_from_iter(values), |row| {
        Ok(Aggregate {
            entries: row.get(0)?,
            primary_total: row.get(1)?,
            secondary_total: row.get(2)?,
        })
    })?;
    Ok(agg)
}

/// Per-date sums over `range`, oldest date first. Dates without rows are absent.
pub fn daily_totals(conn: &Connection, kind: HabitKind, range: DateRange) -> AppResult<Vec<DayTotals>> {
    let profile = kind.profile();
    let (filter, values) = range.where_clause();
    let sql = format!(
        "SELECT date, COUNT(*), COALESCE(SUM({}), 0), {}
         FROM {} {}
         GROUP BY date
         ORDER BY date ASC",
        profile.primary_column,
        secondary_sum(kind),
        profile.table,
        filter
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values), map_day)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Number of distinct dates whose per-date sum of `col` is at least `threshold`.
pub fn goal_days_count(
    conn: &Connection,
    kind: HabitKind,
    col: MetricColumn,
    threshold: f64,
) -> AppResult<i64> {
    let sql = format!(
        "SELECT COUNT(*) FROM (
             SELECT date FROM {}
             GROUP BY date
             HAVING TOTAL({}) >= ?1
         )",
        kind.profile().table,
        column(kind, col)?
    );
    Ok(conn.query_row(&sql, [threshold], |row| row.get(0))?)
}

/// The date with the largest per-date sum of `col`, with its totals.
/// Ties go to the most recent date.
pub fn best_day(conn: &Connection, kind: HabitKind, col: MetricColumn) -> AppResult<DayTotals> {
    let profile = kind.profile();
    let sql = format!(
        "SELECT date, COUNT(*), COALESCE(SUM({}), 0), {}
         FROM {}
         GROUP BY date
         ORDER BY TOTAL({}) DESC, date DESC
         LIMIT 1",
        profile.primary_column,
        secondary_sum(kind),
        profile.table,
        column(kind, col)?
    );

    conn.query_row(&sql, [], map_day)
        .optional()?
        .ok_or(AppError::NoData(profile.table))
}

/// First and last stored date, or `None` for an empty table.
pub fn date_span(conn: &Connection, kind: HabitKind) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    let sql = format!("SELECT MIN(date), MAX(date) FROM {}", kind.profile().table);
    let (first, last): (Option<String>, Option<String>) =
        conn.query_row(&sql, [], |row| Ok((row.get(0)?, row.get(1)?)))?;

    match (first, last) {
        (Some(first), Some(last)) => Ok(Some((parse_date_col(first)?, parse_date_col(last)?))),
        _ => Ok(None),
    }
}
