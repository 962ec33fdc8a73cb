//! Date helpers. Dates are stored as ISO text and shown as `dd-MM-yy`.

use chrono::{Days, NaiveDate};
use serde::Serializer;

/// Format used at the user-facing boundary.
pub const DISPLAY_FORMAT: &str = "%d-%m-%y";
/// Format used in the database.
pub const STORE_FORMAT: &str = "%Y-%m-%d";

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a `dd-MM-yy` date. Two-digit years map to 1969..=2068.
pub fn parse_display(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    // chrono accepts single-digit fields; insist on the exact shape
    if s.len() != 8 {
        return None;
    }
    NaiveDate::parse_from_str(s, DISPLAY_FORMAT).ok()
}

pub fn format_display(d: &NaiveDate) -> String {
    d.format(DISPLAY_FORMAT).to_string()
}

pub fn parse_store(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, STORE_FORMAT).ok()
}

pub fn format_store(d: &NaiveDate) -> String {
    d.format(STORE_FORMAT).to_string()
}

/// `days` back from `end`, or `None` past the calendar's lower bound.
pub fn days_before(end: NaiveDate, days: u32) -> Option<NaiveDate> {
    end.checked_sub_days(Days::new(days as u64))
}

/// `days` consecutive dates ending with `end`, oldest first.
/// `None` when the first one would fall outside the calendar.
pub fn trailing_days(end: NaiveDate, days: u32) -> Option<Vec<NaiveDate>> {
    if days == 0 {
        return Some(Vec::new());
    }
    let first = days_before(end, days - 1)?;
    Some(first.iter_days().take(days as usize).collect())
}

/// Short label for charts, e.g. `Jun 05`.
pub fn short_label(d: &NaiveDate) -> String {
    d.format("%b %d").to_string()
}

pub fn serialize_display<S: Serializer>(d: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_display(d))
}
