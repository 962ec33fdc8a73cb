use super::habit::HabitKind;
use crate::utils::date;
use chrono::NaiveDate;
use serde::Serialize;

/// Measured values of one entry; the variant decides the habit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "habit", rename_all = "lowercase")]
pub enum Metrics {
    Water { glasses: i64 },
    Walking { steps: i64, distance_km: f64 },
}

impl Metrics {
    pub fn kind(&self) -> HabitKind {
        match self {
            Metrics::Water { .. } => HabitKind::Water,
            Metrics::Walking { .. } => HabitKind::Walking,
        }
    }

    /// Glasses for water, steps for walking.
    pub fn primary(&self) -> i64 {
        match self {
            Metrics::Water { glasses } => *glasses,
            Metrics::Walking { steps, .. } => *steps,
        }
    }

    pub fn secondary(&self) -> Option<f64> {
        match self {
            Metrics::Water { .. } => None,
            Metrics::Walking { distance_km, .. } => Some(*distance_km),
        }
    }
}

/// A persisted entry (`water_intake` or `walking_activity` row).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: i64,
    #[serde(serialize_with = "date::serialize_display")]
    pub date: NaiveDate, // ⇔ date (TEXT "YYYY-MM-DD")
    pub metrics: Metrics,
    pub description: Option<String>,
    pub created_at: String, // ⇔ created_at (TEXT, local timestamp)
}

impl Record {
    pub fn kind(&self) -> HabitKind {
        self.metrics.kind()
    }

    pub fn date_str(&self) -> String {
        date::format_display(&self.date)
    }
}

/// Fields supplied by the user for insert or full-replace update.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub date: NaiveDate,
    pub metrics: Metrics,
    pub description: Option<String>,
}
