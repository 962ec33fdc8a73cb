//! Plain read models handed to the presentation layer.

use super::habit::HabitKind;
use crate::utils::date;
use chrono::NaiveDate;
use serde::Serialize;

/// `{count, sum(primary), sum(secondary)}` over a date range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Aggregate {
    pub entries: i64,
    pub primary_total: i64,
    pub secondary_total: f64,
}

/// Per-date sums of one habit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTotals {
    #[serde(serialize_with = "date::serialize_display")]
    pub date: NaiveDate,
    pub entries: i64,
    pub primary: i64,
    pub secondary: f64,
}

impl DayTotals {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            entries: 0,
            primary: 0,
            secondary: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallStats {
    pub habit: HabitKind,
    pub total_entries: i64,
    pub total_primary: i64,
    pub total_secondary: Option<f64>,
    /// `None` when there are no entries; the caller decides how to show it.
    pub average_per_entry: Option<f64>,
}

/// One point of the zero-filled weekly series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPoint {
    #[serde(serialize_with = "date::serialize_display")]
    pub date: NaiveDate,
    pub primary: i64,
    pub secondary: Option<f64>,
    pub goal_met: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressTier {
    GoalMet,
    AlmostThere,
    Halfway,
    GettingStarted,
}

impl ProgressTier {
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 100.0 {
            ProgressTier::GoalMet
        } else if percent >= 75.0 {
            ProgressTier::AlmostThere
        } else if percent >= 50.0 {
            ProgressTier::Halfway
        } else {
            ProgressTier::GettingStarted
        }
    }
}

/// Totals of a single day measured against the daily goal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Progress {
    pub habit: HabitKind,
    #[serde(serialize_with = "date::serialize_display")]
    pub date: NaiveDate,
    pub primary: i64,
    pub secondary: Option<f64>,
    pub goal: i64,
    pub remaining: i64,
    pub percent: f64,
    pub goal_met: bool,
    pub tier: ProgressTier,
}

/// Everything the "statistics" screen of one habit shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitStatistics {
    pub overall: OverallStats,
    pub rolling_window_days: i64,
    pub rolling_average: Option<f64>,
    pub goal: i64,
    pub goal_days: i64,
    pub best_day: Option<DayTotals>,
    pub today: Progress,
}

fn serialize_optional_date<S: serde::Serializer>(
    d: &Option<NaiveDate>,
    s: S,
) -> Result<S::Ok, S::Error> {
    match d {
        Some(d) => date::serialize_display(d, s),
        None => s.serialize_none(),
    }
}

/// Record count and date span of one habit table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitStoreInfo {
    pub habit: HabitKind,
    pub table: &'static str,
    pub entries: i64,
    #[serde(serialize_with = "serialize_optional_date")]
    pub first: Option<NaiveDate>,
    #[serde(serialize_with = "serialize_optional_date")]
    pub last: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreInfo {
    pub path: String,
    pub size_bytes: u64,
    pub habits: Vec<HabitStoreInfo>,
}
