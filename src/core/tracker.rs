use crate::core::aggregate::Aggregator;
use crate::core::input::{MetricInput, RecordId, RecordPatch, normalize_description, resolve_metrics};
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::habit::HabitKind;
use crate::models::record::{NewRecord, Record};
use crate::models::stats::{DayPoint, HabitStatistics, Progress};
use crate::utils::date;
use chrono::NaiveDate;

/// Validated "add" request.
#[derive(Debug, Clone)]
pub struct AddRequest {
    pub date: NaiveDate,
    pub metric: MetricInput,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AddOutcome {
    pub record: Record,
    /// Progress of the record's day after the insert.
    pub progress: Progress,
}

/// Result of an update or delete, from the number of rows affected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    Changed,
    /// No row matched: the record was already gone.
    Missing,
}

impl RowOutcome {
    fn from_rows(n: usize) -> Self {
        if n > 0 {
            RowOutcome::Changed
        } else {
            RowOutcome::Missing
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    pub before: Record,
    pub after: Option<Record>,
    pub outcome: RowOutcome,
}

/// High-level operations of one habit. Water and walking use the same code,
/// configured by `HabitKind`.
///
/// Every operation opens its own connection and releases it before returning.
pub struct HabitTracker {
    kind: HabitKind,
    db_path: String,
    today: NaiveDate,
}

impl HabitTracker {
    pub fn new(kind: HabitKind, db_path: &str, today: NaiveDate) -> Self {
        Self {
            kind,
            db_path: db_path.to_string(),
            today,
        }
    }

    fn open(&self) -> AppResult<DbPool> {
        DbPool::new(&self.db_path)
    }

    /// Validate, insert, then report the day's progress.
    /// Nothing is written when validation fails.
    pub fn add(&self, req: AddRequest) -> AppResult<AddOutcome> {
        let metrics = resolve_metrics(self.kind, req.metric)?;
        let new = NewRecord {
            date: req.date,
            metrics,
            description: normalize_description(req.description),
        };

        let mut pool = self.open()?;
        let kind = self.kind;
        let record = pool.with_tx(|tx| {
            let id = queries::insert_record(tx, &new)?;
            audit(
                tx,
                "add",
                &format!("{}#{}", kind.code(), id),
                &format!(
                    "{} {} on {}",
                    new.metrics.primary(),
                    kind.profile().primary_unit,
                    date::format_display(&new.date)
                ),
            )?;
            queries::get_record(tx, kind, id)
        })?;

        let progress = Aggregator::new(&pool.conn, self.kind, self.today).progress_for(record.date)?;
        Ok(AddOutcome { record, progress })
    }

    pub fn view(&self) -> AppResult<Vec<Record>> {
        let pool = self.open()?;
        queries::list_records(&pool.conn, self.kind)
    }

    pub fn recent(&self, limit: u32) -> AppResult<Vec<Record>> {
        let pool = self.open()?;
        queries::list_recent(&pool.conn, self.kind, limit)
    }

    pub fn find(&self, id: RecordId) -> AppResult<Record> {
        let pool = self.open()?;
        queries::get_record(&pool.conn, self.kind, id.get())
    }

    /// Delete by id. A missing id is reported as `Missing`, not as an error.
    pub fn delete(&self, id: RecordId) -> AppResult<RowOutcome> {
        let mut pool = self.open()?;
        let kind = self.kind;
        pool.with_tx(|tx| {
            let n = queries::delete_record(tx, kind, id.get())?;
            if n > 0 {
                audit(
                    tx,
                    "del",
                    &format!("{}#{}", kind.code(), id.get()),
                    "record deleted",
                )?;
            }
            Ok(RowOutcome::from_rows(n))
        })
    }

    /// Fetch the current values, apply `patch`, validate, write.
    /// Fails with `RecordNotFound` before touching anything if `id` is unknown,
    /// and leaves the record unchanged if the merged values are invalid.
    pub fn update(&self, id: RecordId, patch: &RecordPatch) -> AppResult<UpdateOutcome> {
        let mut pool = self.open()?;
        let kind = self.kind;
        pool.with_tx(|tx| {
            let before = queries::get_record(tx, kind, id.get())?;
            let merged = patch.merge(&before)?;

            let n = queries::update_record(tx, id.get(), &merged)?;
            let outcome = RowOutcome::from_rows(n);

            let after = if outcome == RowOutcome::Changed {
                audit(
                    tx,
                    "edit",
                    &format!("{}#{}", kind.code(), id.get()),
                    &format!(
                        "{} {} on {}",
                        merged.metrics.primary(),
                        kind.profile().primary_unit,
                        date::format_display(&merged.date)
                    ),
                )?;
                Some(queries::get_record(tx, kind, id.get())?)
            } else {
                None
            };

            Ok(UpdateOutcome {
                before,
                after,
                outcome,
            })
        })
    }

    pub fn statistics(&self, window_days: u32) -> AppResult<HabitStatistics> {
        let pool = self.open()?;
        Aggregator::new(&pool.conn, self.kind, self.today).statistics(window_days)
    }

    pub fn weekly(&self, days: u32) -> AppResult<Vec<DayPoint>> {
        let pool = self.open()?;
        Aggregator::new(&pool.conn, self.kind, self.today).weekly_series(days)
    }

    /// Progress of `day`, or of today when `None`.
    pub fn progress(&self, day: Option<NaiveDate>) -> AppResult<Progress> {
        let pool = self.open()?;
        Aggregator::new(&pool.conn, self.kind, self.today).progress_for(day.unwrap_or(self.today))
    }
}
