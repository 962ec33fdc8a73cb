//! Store overview: file size and, per habit, how many records and which dates they span.

use crate::db::queries::{self, DateRange};
use crate::errors::AppResult;
use crate::models::habit::HabitKind;
use crate::models::stats::{HabitStoreInfo, StoreInfo};
use rusqlite::Connection;
use std::fs;

pub fn store_info(conn: &Connection, db_path: &str) -> AppResult<StoreInfo> {
    // an in-memory or not-yet-flushed database has no file to measure
    let size_bytes = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);

    let mut habits = Vec::with_capacity(HabitKind::ALL.len());
    for kind in HabitKind::ALL {
        let agg = queries::aggregate(conn, kind, DateRange::All)?;
        let span = queries::date_span(conn, kind)?;
        habits.push(HabitStoreInfo {
            habit: kind,
            table: kind.profile().table,
            entries: agg.entries,
            first: span.map(|(first, _)| first),
            last: span.map(|(_, last)| last),
        });
    }

    Ok(StoreInfo {
        path: db_path.to_string(),
        size_bytes,
        habits,
    })
}
