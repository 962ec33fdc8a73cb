//! Aggregation engine: turns Record Store queries into the statistics shown
//! for one habit.
//!
//! Two empty-day rules coexist:
//! - `rolling_average` averages only days that have at least one record;
//! - `weekly_series` reports every calendar day, zero-filled.

use crate::core::conversion::goal_percent;
use crate::db::queries::{self, DateRange};
use crate::errors::{AppError, AppResult};
use crate::models::habit::{HabitKind, MetricColumn};
use crate::models::stats::{
    DayPoint, DayTotals, HabitStatistics, OverallStats, Progress, ProgressTier,
};
use crate::utils::date;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::collections::HashMap;

/// Longest day-by-day series the engine will build.
pub const MAX_SERIES_DAYS: u32 = 366;

fn window_error(days: u32) -> AppError {
    AppError::Validation(format!(
        "A window of {} days reaches past the supported calendar",
        days
    ))
}

pub struct Aggregator<'a> {
    conn: &'a Connection,
    kind: HabitKind,
    today: NaiveDate,
}

impl<'a> Aggregator<'a> {
    pub fn new(conn: &'a Connection, kind: HabitKind, today: NaiveDate) -> Self {
        Self { conn, kind, today }
    }

    pub fn overall_stats(&self) -> AppResult<OverallStats> {
        let agg = queries::aggregate(self.conn, self.kind, DateRange::All)?;
        let average_per_entry = if agg.entries > 0 {
            Some(agg.primary_total as f64 / agg.entries as f64)
        } else {
            None
        };

        Ok(OverallStats {
            habit: self.kind,
            total_entries: agg.entries,
            total_primary: agg.primary_total,
            total_secondary: self
                .kind
                .profile()
                .secondary_column
                .map(|_| agg.secondary_total),
            average_per_entry,
        })
    }

    /// Mean of per-date totals for dates `>= today - window_days` that have
    /// records. `None` when no such date exists.
    pub fn rolling_average(&self, window_days: u32) -> AppResult<Option<f64>> {
        let from =
            date::days_before(self.today, window_days).ok_or_else(|| window_error(window_days))?;
        let days = queries::daily_totals(self.conn, self.kind, DateRange::Since(from))?;

        if days.is_empty() {
            return Ok(None);
        }
        let sum: i64 = days.iter().map(|d| d.primary).sum();
        Ok(Some(sum as f64 / days.len() as f64))
    }

    pub fn goal_achievement_days(&self, threshold: i64) -> AppResult<i64> {
        queries::goal_days_count(self.conn, self.kind, MetricColumn::Primary, threshold as f64)
    }

    /// Day with the highest primary total, or `None` when there are no records.
    /// Ties go to the most recent date.
    pub fn best_day(&self) -> AppResult<Option<DayTotals>> {
        match queries::best_day(self.conn, self.kind, MetricColumn::Primary) {
            Ok(day) => Ok(Some(day)),
            Err(AppError::NoData(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// The last `days` calendar days ending today, oldest first, one entry per
    /// day even when the day has no records. At most `MAX_SERIES_DAYS` days.
    pub fn weekly_series(&self, days: u32) -> AppResult<Vec<DayPoint>> {
        if days > MAX_SERIES_DAYS {
            return Err(AppError::Validation(format!(
                "A series covers at most {} days, got {}",
                MAX_SERIES_DAYS, days
            )));
        }
        let dates = date::trailing_days(self.today, days).ok_or_else(|| window_error(days))?;
        let Some(first) = dates.first().copied() else {
            return Ok(Vec::new());
        };

        let totals: HashMap<NaiveDate, DayTotals> = queries::daily_totals(
            self.conn,
            self.kind,
            DateRange::Between(first, self.today),
        )?
        .into_iter()
        .map(|d| (d.date, d))
        .collect();

        let profile = self.kind.profile();
        Ok(dates
            .into_iter()
            .map(|d| {
                let day = totals.get(&d).cloned().unwrap_or_else(|| DayTotals::empty(d));
                DayPoint {
                    date: d,
                    primary: day.primary,
                    secondary: profile.secondary_column.map(|_| day.secondary),
                    goal_met: day.primary >= profile.daily_goal,
                }
            })
            .collect())
    }

    /// Totals of `day` against the daily goal.
    pub fn progress_for(&self, day: NaiveDate) -> AppResult<Progress> {
        let profile = self.kind.profile();
        let primary =
            queries::sum_by_date(self.conn, self.kind, MetricColumn::Primary, &day)?.round() as i64;
        let secondary = match profile.secondary_column {
            Some(_) => Some(queries::sum_by_date(
                self.conn,
                self.kind,
                MetricColumn::Secondary,
                &day,
            )?),
            None => None,
        };

        let percent = goal_percent(primary as f64, profile.daily_goal as f64);
        Ok(Progress {
            habit: self.kind,
            date: day,
            primary,
            secondary,
            goal: profile.daily_goal,
            remaining: (profile.daily_goal - primary).max(0),
            percent,
            goal_met: primary >= profile.daily_goal,
            tier: ProgressTier::from_percent(percent),
        })
    }

    pub fn today_progress(&self) -> AppResult<Progress> {
        self.progress_for(self.today)
    }

    /// Everything the statistics view needs, in one pass.
    pub fn statistics(&self, window_days: u32) -> AppResult<HabitStatistics> {
        let goal = self.kind.profile().daily_goal;
        Ok(HabitStatistics {
            overall: self.overall_stats()?,
            rolling_window_days: window_days as i64,
            rolling_average: self.rolling_average(window_days)?,
            goal,
            goal_days: self.goal_achievement_days(goal)?,
            best_day: self.best_day()?,
            today: self.today_progress()?,
        })
    }
}
