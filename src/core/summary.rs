//! Both habits side by side: statistics, today's verdict and a shared week.

use crate::core::aggregate::Aggregator;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::habit::HabitKind;
use crate::models::stats::HabitStatistics;
use crate::utils::date;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Insight {
    BothGoals,
    WaterOnly,
    StepsOnly,
    KeepGoing,
}

impl Insight {
    pub fn from_goals(water_met: bool, steps_met: bool) -> Self {
        match (water_met, steps_met) {
            (true, true) => Insight::BothGoals,
            (true, false) => Insight::WaterOnly,
            (false, true) => Insight::StepsOnly,
            (false, false) => Insight::KeepGoing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedDay {
    #[serde(serialize_with = "date::serialize_display")]
    pub date: NaiveDate,
    pub water: i64,
    pub steps: i64,
    pub water_met: bool,
    pub steps_met: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedSummary {
    pub water: HabitStatistics,
    pub walking: HabitStatistics,
    pub insight: Insight,
    pub week: Vec<CombinedDay>,
}

pub fn build(db_path: &str, today: NaiveDate, window_days: u32, days: u32) -> AppResult<CombinedSummary> {
    let pool = DbPool::new(db_path)?;
    let water = Aggregator::new(&pool.conn, HabitKind::Water, today);
    let walking = Aggregator::new(&pool.conn, HabitKind::Walking, today);

    let water_stats = water.statistics(window_days)?;
    let walking_stats = walking.statistics(window_days)?;

    let week = water
        .weekly_series(days)?
        .into_iter()
        .zip(walking.weekly_series(days)?)
        .map(|(w, s)| CombinedDay {
            date: w.date,
            water: w.primary,
            steps: s.primary,
            water_met: w.goal_met,
            steps_met: s.goal_met,
        })
        .collect();

    let insight = Insight::from_goals(water_stats.today.goal_met, walking_stats.today.goal_met);

    Ok(CombinedSummary {
        water: water_stats,
        walking: walking_stats,
        insight,
        week,
    })
}
