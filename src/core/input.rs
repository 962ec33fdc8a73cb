//! Validated user input: dates with a cancel token, record ids with a cancel
//! value, and metric inputs turned into checked `Metrics`.

use crate::core::conversion::{km_to_steps, steps_to_km};
use crate::errors::{AppError, AppResult};
use crate::models::habit::HabitKind;
use crate::models::record::{Metrics, NewRecord, Record};
use crate::utils::date;
use chrono::NaiveDate;

/// Typing one of these at a date prompt aborts the operation.
pub const CANCEL_TOKENS: [&str; 2] = ["cancel", "0"];
/// Resolves to the session's current day.
pub const TODAY_TOKEN: &str = "today";

pub const MAX_GLASSES: i64 = 50;
pub const MAX_STEPS: i64 = 100_000;
pub const MAX_DISTANCE_KM: f64 = 200.0;

/// Parse a `dd-MM-yy` date. `Ok(None)` means the user cancelled.
pub fn parse_date_input(raw: &str, today: NaiveDate) -> AppResult<Option<NaiveDate>> {
    let s = raw.trim();
    if CANCEL_TOKENS.iter().any(|t| s.eq_ignore_ascii_case(t)) {
        return Ok(None);
    }
    if s.eq_ignore_ascii_case(TODAY_TOKEN) {
        return Ok(Some(today));
    }
    date::parse_display(s)
        .map(Some)
        .ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// Store-assigned id, always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(i64);

impl RecordId {
    /// `0` cancels (`Ok(None)`); negative ids are rejected before any query.
    pub fn parse(raw: i64) -> AppResult<Option<Self>> {
        match raw {
            0 => Ok(None),
            n if n < 0 => Err(AppError::InvalidId(n)),
            n => Ok(Some(RecordId(n))),
        }
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

/// What the user measured for one entry.
///
/// Walking accepts steps, distance or both; the missing one is derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricInput {
    Glasses(i64),
    Steps(i64),
    Distance(f64),
    Both { steps: i64, distance_km: f64 },
}

fn check_count(field: &'static str, value: i64, max: i64) -> AppResult<i64> {
    if value <= 0 {
        return Err(AppError::InvalidQuantity {
            field,
            value: value.to_string(),
            reason: "must be greater than zero".into(),
        });
    }
    if value > max {
        return Err(AppError::InvalidQuantity {
            field,
            value: value.to_string(),
            reason: format!("must be at most {}", max),
        });
    }
    Ok(value)
}

fn check_distance(value: f64) -> AppResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::InvalidQuantity {
            field: "distance",
            value: value.to_string(),
            reason: "must be greater than zero".into(),
        });
    }
    if value > MAX_DISTANCE_KM {
        return Err(AppError::InvalidQuantity {
            field: "distance",
            value: value.to_string(),
            reason: format!("must be at most {} km", MAX_DISTANCE_KM),
        });
    }
    Ok(value)
}

/// Turn `input` into checked metrics for `kind`, deriving the missing walking
/// metric. Every resulting value is positive and within bounds.
pub fn resolve_metrics(kind: HabitKind, input: MetricInput) -> AppResult<Metrics> {
    match (kind, input) {
        (HabitKind::Water, MetricInput::Glasses(n)) => Ok(Metrics::Water {
            glasses: check_count("quantity", n, MAX_GLASSES)?,
        }),
        (HabitKind::Water, _) => Err(AppError::Validation(
            "Water intake is measured in glasses".into(),
        )),
        (HabitKind::Walking, MetricInput::Glasses(_)) => Err(AppError::Validation(
            "Walking activity is measured in steps and/or kilometres".into(),
        )),
        (HabitKind::Walking, MetricInput::Steps(n)) => {
            let steps = check_count("steps", n, MAX_STEPS)?;
            Ok(Metrics::Walking {
                steps,
                distance_km: check_distance(steps_to_km(steps))?,
            })
        }
        (HabitKind::Walking, MetricInput::Distance(km)) => {
            let distance_km = check_distance(km)?;
            Ok(Metrics::Walking {
                steps: check_count("steps (derived from distance)", km_to_steps(distance_km), MAX_STEPS)?,
                distance_km,
            })
        }
        (HabitKind::Walking, MetricInput::Both { steps, distance_km }) => Ok(Metrics::Walking {
            steps: check_count("steps", steps, MAX_STEPS)?,
            distance_km: check_distance(distance_km)?,
        }),
    }
}

/// Re-check metrics that did not come through `resolve_metrics`.
pub fn validate_metrics(m: &Metrics) -> AppResult<()> {
    match *m {
        Metrics::Water { glasses } => {
            check_count("quantity", glasses, MAX_GLASSES)?;
        }
        Metrics::Walking { steps, distance_km } => {
            check_count("steps", steps, MAX_STEPS)?;
            check_distance(distance_km)?;
        }
    }
    Ok(())
}

/// Trimmed description; blank becomes `None`.
pub fn normalize_description(desc: Option<String>) -> Option<String> {
    desc.map(|d| d.trim().to_string()).filter(|d| !d.is_empty())
}

/// New values for an update; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub date: Option<NaiveDate>,
    pub steps: Option<i64>,
    pub distance_km: Option<f64>,
    pub glasses: Option<i64>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
}

impl RecordPatch {
    /// Apply the patch on top of `current` and validate the result.
    ///
    /// Walking fields default independently: changing only the steps keeps the
    /// stored distance.
    pub fn merge(&self, current: &Record) -> AppResult<NewRecord> {
        let metrics = match current.metrics {
            Metrics::Water { glasses } => {
                if self.steps.is_some() || self.distance_km.is_some() {
                    return Err(AppError::Validation(
                        "Water intake is measured in glasses".into(),
                    ));
                }
                Metrics::Water {
                    glasses: self.glasses.unwrap_or(glasses),
                }
            }
            Metrics::Walking { steps, distance_km } => {
                if self.glasses.is_some() {
                    return Err(AppError::Validation(
                        "Walking activity is measured in steps and/or kilometres".into(),
                    ));
                }
                Metrics::Walking {
                    steps: self.steps.unwrap_or(steps),
                    distance_km: self.distance_km.unwrap_or(distance_km),
                }
            }
        };
        validate_metrics(&metrics)?;

        let description = match &self.description {
            Some(new) => normalize_description(new.clone()),
            None => current.description.clone(),
        };

        Ok(NewRecord {
            date: self.date.unwrap_or(current.date),
            metrics,
            description,
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == RecordPatch::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn date_input_handles_cancel_and_today() {
        let today = d(2024, 6, 5);
        assert_eq!(parse_date_input("0", today).unwrap(), None);
        assert_eq!(parse_date_input(" Cancel ", today).unwrap(), None);
        assert_eq!(parse_date_input("today", today).unwrap(), Some(today));
        assert_eq!(parse_date_input("01-01-24", today).unwrap(), Some(d(2024, 1, 1)));
        assert!(matches!(
            parse_date_input("2024-01-01", today),
            Err(AppError::InvalidDate(_))
        ));
        assert!(parse_date_input("31-02-24", today).is_err());
    }

    #[test]
    fn record_id_sentinels() {
        assert_eq!(RecordId::parse(0).unwrap(), None);
        assert_eq!(RecordId::parse(7).unwrap().map(RecordId::get), Some(7));
        assert!(matches!(RecordId::parse(-3), Err(AppError::InvalidId(-3))));
    }

    #[test]
    fn walking_derives_missing_metric() {
        let m = resolve_metrics(HabitKind::Walking, MetricInput::Steps(10_000)).unwrap();
        assert_eq!(m.primary(), 10_000);
        assert!((m.secondary().unwrap() - 7.62).abs() < 1e-9);

        let m = resolve_metrics(HabitKind::Walking, MetricInput::Distance(1.0)).unwrap();
        assert_eq!(m.primary(), 1312);
    }

    #[test]
    fn non_positive_values_are_rejected() {
        assert!(resolve_metrics(HabitKind::Water, MetricInput::Glasses(0)).is_err());
        assert!(resolve_metrics(HabitKind::Water, MetricInput::Glasses(-2)).is_err());
        assert!(resolve_metrics(HabitKind::Walking, MetricInput::Steps(0)).is_err());
        assert!(resolve_metrics(HabitKind::Walking, MetricInput::Distance(0.0)).is_err());
        // too short to make a single step
        assert!(resolve_metrics(HabitKind::Walking, MetricInput::Distance(0.0005)).is_err());
        assert!(
            resolve_metrics(
                HabitKind::Walking,
                MetricInput::Both {
                    steps: 500,
                    distance_km: -1.0
                }
            )
            .is_err()
        );
    }

    #[test]
    fn bounds_are_enforced() {
        assert!(resolve_metrics(HabitKind::Water, MetricInput::Glasses(51)).is_err());
        assert!(resolve_metrics(HabitKind::Walking, MetricInput::Steps(100_001)).is_err());
        assert!(resolve_metrics(HabitKind::Walking, MetricInput::Distance(250.0)).is_err());
    }

    #[test]
    fn wrong_metric_for_habit() {
        assert!(matches!(
            resolve_metrics(HabitKind::Water, MetricInput::Steps(10)),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            resolve_metrics(HabitKind::Walking, MetricInput::Glasses(3)),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn patch_keeps_current_values() {
        let current = Record {
            id: 4,
            date: d(2024, 1, 2),
            metrics: Metrics::Walking {
                steps: 5000,
                distance_km: 3.81,
            },
            description: Some("park".into()),
            created_at: "2024-01-02 10:00:00.000".into(),
        };

        let patch = RecordPatch {
            steps: Some(6000),
            ..Default::default()
        };
        let merged = patch.merge(&current).unwrap();
        assert_eq!(merged.date, current.date);
        assert_eq!(
            merged.metrics,
            Metrics::Walking {
                steps: 6000,
                distance_km: 3.81
            }
        );
        assert_eq!(merged.description.as_deref(), Some("park"));

        let clear = RecordPatch {
            description: Some(None),
            ..Default::default()
        };
        assert_eq!(clear.merge(&current).unwrap().description, None);

        let bad = RecordPatch {
            steps: Some(0),
            ..Default::default()
        };
        assert!(bad.merge(&current).is_err());
    }
}
