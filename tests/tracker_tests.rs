use habitlogger::core::aggregate::Aggregator;
use habitlogger::core::input::{MetricInput, RecordId, RecordPatch};
use habitlogger::core::tracker::{AddRequest, HabitTracker, RowOutcome};
use habitlogger::db::log::load_log;
use habitlogger::db::pool::DbPool;
use habitlogger::errors::{AppError, ErrorKind};
use habitlogger::models::habit::HabitKind;
use habitlogger::models::record::Metrics;
use habitlogger::models::stats::ProgressTier;

mod common;
use common::{d, fresh_db};

fn add(tracker: &HabitTracker, date: &str, metric: MetricInput) -> i64 {
    tracker
        .add(AddRequest {
            date: d(date),
            metric,
            description: None,
        })
        .expect("add")
        .record
        .id
}

fn id(n: i64) -> RecordId {
    RecordId::parse(n).unwrap().unwrap()
}

#[test]
fn test_insert_then_find_returns_same_fields() {
    let (_dir, db) = fresh_db();
    let tracker = HabitTracker::new(HabitKind::Walking, &db, d("05-06-24"));

    let out = tracker
        .add(AddRequest {
            date: d("04-06-24"),
            metric: MetricInput::Both {
                steps: 4200,
                distance_km: 3.1,
            },
            description: Some("  river path ".into()),
        })
        .unwrap();

    let found = tracker.find(id(out.record.id)).unwrap();
    assert_eq!(found, out.record);
    assert_eq!(found.date, d("04-06-24"));
    assert_eq!(
        found.metrics,
        Metrics::Walking {
            steps: 4200,
            distance_km: 3.1
        }
    );
    assert_eq!(found.description.as_deref(), Some("river path"));
    assert!(!found.created_at.is_empty());
}

#[test]
fn test_invalid_add_writes_nothing() {
    let (_dir, db) = fresh_db();
    let water = HabitTracker::new(HabitKind::Water, &db, d("05-06-24"));
    let walk = HabitTracker::new(HabitKind::Walking, &db, d("05-06-24"));

    for n in [0, -1, 51] {
        let err = water
            .add(AddRequest {
                date: d("05-06-24"),
                metric: MetricInput::Glasses(n),
                description: None,
            })
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
    assert!(
        walk.add(AddRequest {
            date: d("05-06-24"),
            metric: MetricInput::Distance(-2.0),
            description: None,
        })
        .is_err()
    );

    assert!(water.view().unwrap().is_empty());
    assert!(walk.view().unwrap().is_empty());

    let pool = DbPool::new(&db).unwrap();
    assert!(load_log(&pool.conn).unwrap().is_empty());
}

#[test]
fn test_goal_days_count_distinct_dates() {
    let (_dir, db) = fresh_db();
    let water = HabitTracker::new(HabitKind::Water, &db, d("05-01-24"));

    add(&water, "01-01-24", MetricInput::Glasses(5));
    add(&water, "01-01-24", MetricInput::Glasses(4));
    add(&water, "02-01-24", MetricInput::Glasses(8));
    add(&water, "03-01-24", MetricInput::Glasses(7));

    let pool = DbPool::new(&db).unwrap();
    let agg = Aggregator::new(&pool.conn, HabitKind::Water, d("05-01-24"));
    assert_eq!(agg.goal_achievement_days(8).unwrap(), 2);
    assert_eq!(agg.goal_achievement_days(10).unwrap(), 0);
}

#[test]
fn test_best_day_by_daily_total() {
    let (_dir, db) = fresh_db();
    let walk = HabitTracker::new(HabitKind::Walking, &db, d("05-01-24"));

    add(&walk, "01-01-24", MetricInput::Steps(5000));
    add(&walk, "02-01-24", MetricInput::Steps(7000));
    add(&walk, "02-01-24", MetricInput::Steps(5000));

    let pool = DbPool::new(&db).unwrap();
    let agg = Aggregator::new(&pool.conn, HabitKind::Walking, d("05-01-24"));
    let best = agg.best_day().unwrap().expect("a best day");
    assert_eq!(best.date, d("02-01-24"));
    assert_eq!(best.primary, 12000);
    assert_eq!(best.entries, 2);
}

#[test]
fn test_best_day_is_none_without_records() {
    let (_dir, db) = fresh_db();
    let pool = DbPool::new(&db).unwrap();
    let agg = Aggregator::new(&pool.conn, HabitKind::Water, d("05-01-24"));

    assert_eq!(agg.best_day().unwrap(), None);
    assert_eq!(agg.rolling_average(30).unwrap(), None);

    let overall = agg.overall_stats().unwrap();
    assert_eq!(overall.total_entries, 0);
    assert_eq!(overall.average_per_entry, None);
}

#[test]
fn test_weekly_series_is_zero_filled() {
    let (_dir, db) = fresh_db();
    let water = HabitTracker::new(HabitKind::Water, &db, d("10-01-24"));

    add(&water, "04-01-24", MetricInput::Glasses(8));
    add(&water, "10-01-24", MetricInput::Glasses(3));
    // outside the window
    add(&water, "01-01-24", MetricInput::Glasses(6));

    let series = water.weekly(7).unwrap();
    assert_eq!(series.len(), 7);
    assert_eq!(series[0].date, d("04-01-24"));
    assert_eq!(series[6].date, d("10-01-24"));
    assert_eq!(series[0].primary, 8);
    assert!(series[0].goal_met);
    assert_eq!(series[6].primary, 3);
    assert!(series[1..6].iter().all(|p| p.primary == 0 && !p.goal_met));
    assert!(series.iter().all(|p| p.secondary.is_none()));

    assert!(water.weekly(0).unwrap().is_empty());
}

#[test]
fn test_rolling_average_skips_empty_days() {
    let (_dir, db) = fresh_db();
    let water = HabitTracker::new(HabitKind::Water, &db, d("10-01-24"));

    add(&water, "02-01-24", MetricInput::Glasses(2));
    add(&water, "02-01-24", MetricInput::Glasses(2));
    add(&water, "10-01-24", MetricInput::Glasses(8));

    let pool = DbPool::new(&db).unwrap();
    let agg = Aggregator::new(&pool.conn, HabitKind::Water, d("10-01-24"));
    // two active days out of the window: (4 + 8) / 2
    assert_eq!(agg.rolling_average(30).unwrap(), Some(6.0));
    // only today falls in a 3-day window
    assert_eq!(agg.rolling_average(3).unwrap(), Some(8.0));

    let overall = agg.overall_stats().unwrap();
    assert_eq!(overall.total_primary, 12);
    assert_eq!(overall.average_per_entry, Some(4.0));
}

#[test]
fn test_delete_missing_is_not_an_error() {
    let (_dir, db) = fresh_db();
    let water = HabitTracker::new(HabitKind::Water, &db, d("05-06-24"));

    assert_eq!(water.delete(id(99)).unwrap(), RowOutcome::Missing);

    let rid = add(&water, "05-06-24", MetricInput::Glasses(1));
    assert_eq!(water.delete(id(rid)).unwrap(), RowOutcome::Changed);
    assert_eq!(water.delete(id(rid)).unwrap(), RowOutcome::Missing);
}

#[test]
fn test_invalid_update_leaves_record_unchanged() {
    let (_dir, db) = fresh_db();
    let water = HabitTracker::new(HabitKind::Water, &db, d("05-06-24"));
    let rid = add(&water, "05-06-24", MetricInput::Glasses(5));

    let patch = RecordPatch {
        glasses: Some(0),
        ..Default::default()
    };
    let err = water.update(id(rid), &patch).unwrap_err();
    assert!(matches!(err, AppError::InvalidQuantity { .. }));

    let still = water.find(id(rid)).unwrap();
    assert_eq!(still.metrics, Metrics::Water { glasses: 5 });
}

#[test]
fn test_update_missing_record() {
    let (_dir, db) = fresh_db();
    let walk = HabitTracker::new(HabitKind::Walking, &db, d("05-06-24"));

    let patch = RecordPatch {
        steps: Some(1000),
        ..Default::default()
    };
    let err = walk.update(id(7), &patch).unwrap_err();
    assert!(matches!(err, AppError::RecordNotFound { id: 7, .. }));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_update_changes_only_given_fields() {
    let (_dir, db) = fresh_db();
    let walk = HabitTracker::new(HabitKind::Walking, &db, d("05-06-24"));
    let rid = walk
        .add(AddRequest {
            date: d("03-06-24"),
            metric: MetricInput::Both {
                steps: 3000,
                distance_km: 2.5,
            },
            description: Some("dog".into()),
        })
        .unwrap()
        .record
        .id;

    let patch = RecordPatch {
        date: Some(d("04-06-24")),
        steps: Some(3500),
        ..Default::default()
    };
    let out = walk.update(id(rid), &patch).unwrap();
    assert_eq!(out.outcome, RowOutcome::Changed);
    assert_eq!(out.before.date, d("03-06-24"));

    let after = out.after.expect("updated record");
    assert_eq!(after.date, d("04-06-24"));
    assert_eq!(
        after.metrics,
        Metrics::Walking {
            steps: 3500,
            distance_km: 2.5
        }
    );
    assert_eq!(after.description.as_deref(), Some("dog"));
    assert_eq!(after.created_at, out.before.created_at);
}

#[test]
fn test_today_progress_after_eight_glasses() {
    let (_dir, db) = fresh_db();
    let water = HabitTracker::new(HabitKind::Water, &db, d("05-06-24"));

    let out = water
        .add(AddRequest {
            date: d("05-06-24"),
            metric: MetricInput::Glasses(8),
            description: None,
        })
        .unwrap();
    assert_eq!(out.progress.remaining, 0);
    assert!(out.progress.goal_met);

    let today = water.progress(None).unwrap();
    assert_eq!(today.date, d("05-06-24"));
    assert_eq!(today.primary, 8);
    assert_eq!(today.remaining, 0);
    assert!(today.goal_met);
    assert_eq!(today.tier, ProgressTier::GoalMet);
}

#[test]
fn test_walking_progress_tracks_distance() {
    let (_dir, db) = fresh_db();
    let walk = HabitTracker::new(HabitKind::Walking, &db, d("05-06-24"));

    add(&walk, "05-06-24", MetricInput::Steps(4000));
    add(&walk, "05-06-24", MetricInput::Distance(3.0));

    let p = walk.progress(None).unwrap();
    assert_eq!(p.primary, 4000 + 3937);
    assert_eq!(p.remaining, 10_000 - 7937);
    assert!(!p.goal_met);
    assert_eq!(p.tier, ProgressTier::AlmostThere);
    let km = p.secondary.expect("distance");
    assert!((km - (3.048 + 3.0)).abs() < 1e-9);
}

#[test]
fn test_recent_is_newest_first_and_limited() {
    let (_dir, db) = fresh_db();
    let water = HabitTracker::new(HabitKind::Water, &db, d("05-06-24"));

    let a = add(&water, "01-06-24", MetricInput::Glasses(1));
    let b = add(&water, "03-06-24", MetricInput::Glasses(2));
    let c = add(&water, "03-06-24", MetricInput::Glasses(3));
    let e = add(&water, "02-06-24", MetricInput::Glasses(4));

    let all: Vec<i64> = water.view().unwrap().iter().map(|r| r.id).collect();
    assert_eq!(all, vec![c, b, e, a]);

    let recent: Vec<i64> = water.recent(2).unwrap().iter().map(|r| r.id).collect();
    assert_eq!(recent, vec![c, b]);
}

#[test]
fn test_mutations_are_audited() {
    let (_dir, db) = fresh_db();
    let water = HabitTracker::new(HabitKind::Water, &db, d("05-06-24"));

    let rid = add(&water, "05-06-24", MetricInput::Glasses(2));
    water
        .update(
            id(rid),
            &RecordPatch {
                glasses: Some(3),
                ..Default::default()
            },
        )
        .unwrap();
    water.delete(id(rid)).unwrap();
    water.delete(id(rid)).unwrap();

    let pool = DbPool::new(&db).unwrap();
    let ops: Vec<String> = load_log(&pool.conn)
        .unwrap()
        .into_iter()
        .map(|e| e.operation)
        .collect();
    assert_eq!(ops, vec!["add", "edit", "del"]);
}

#[test]
fn test_statistics_bundle() {
    let (_dir, db) = fresh_db();
    let water = HabitTracker::new(HabitKind::Water, &db, d("05-06-24"));

    add(&water, "04-06-24", MetricInput::Glasses(9));
    add(&water, "05-06-24", MetricInput::Glasses(4));

    let s = water.statistics(30).unwrap();
    assert_eq!(s.overall.total_entries, 2);
    assert_eq!(s.goal, 8);
    assert_eq!(s.goal_days, 1);
    assert_eq!(s.best_day.map(|b| b.date), Some(d("04-06-24")));
    assert_eq!(s.rolling_average, Some(6.5));
    assert_eq!(s.today.primary, 4);
    assert_eq!(s.today.tier, ProgressTier::Halfway);
}

#[test]
fn test_oversized_windows_are_validation_errors() {
    let (_dir, db) = fresh_db();
    let water = HabitTracker::new(HabitKind::Water, &db, d("05-06-24"));
    add(&water, "05-06-24", MetricInput::Glasses(3));

    let err = water.weekly(100_000_000).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(water.weekly(367).is_err());
    assert_eq!(water.weekly(366).unwrap().len(), 366);

    let err = water.statistics(u32::MAX).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let pool = DbPool::new(&db).unwrap();
    let agg = Aggregator::new(&pool.conn, HabitKind::Water, d("05-06-24"));
    assert!(agg.rolling_average(u32::MAX).is_err());
    // far back but still a real date
    assert_eq!(agg.rolling_average(100_000).unwrap(), Some(3.0));
}

#[test]
fn test_best_day_tie_goes_to_latest_date() {
    let (_dir, db) = fresh_db();
    let walk = HabitTracker::new(HabitKind::Walking, &db, d("05-01-24"));

    add(&walk, "01-01-24", MetricInput::Steps(6000));
    add(&walk, "03-01-24", MetricInput::Steps(6000));
    add(&walk, "02-01-24", MetricInput::Steps(2000));

    let pool = DbPool::new(&db).unwrap();
    let best = Aggregator::new(&pool.conn, HabitKind::Walking, d("05-01-24"))
        .best_day()
        .unwrap()
        .expect("a best day");
    assert_eq!(best.date, d("03-01-24"));
}
