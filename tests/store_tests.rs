use habitlogger::db::initialize::init_db;
use habitlogger::db::migrate::table_exists;
use habitlogger::db::pool::DbPool;
use habitlogger::db::queries::{self, DateRange};
use habitlogger::errors::AppError;
use habitlogger::models::habit::{HabitKind, MetricColumn};
use habitlogger::models::record::{Metrics, NewRecord};

mod common;
use common::{d, fresh_db};

fn water(date: &str, glasses: i64) -> NewRecord {
    NewRecord {
        date: d(date),
        metrics: Metrics::Water { glasses },
        description: None,
    }
}

fn walk(date: &str, steps: i64, distance_km: f64) -> NewRecord {
    NewRecord {
        date: d(date),
        metrics: Metrics::Walking { steps, distance_km },
        description: None,
    }
}

#[test]
fn test_schema_is_idempotent() {
    let (_dir, db) = fresh_db();
    let pool = DbPool::new(&db).unwrap();

    init_db(&pool.conn).unwrap();
    init_db(&pool.conn).unwrap();

    for table in ["water_intake", "walking_activity", "log"] {
        assert!(table_exists(&pool.conn, table).unwrap(), "{table}");
    }
}

#[test]
fn test_dates_are_stored_as_iso_text() {
    let (_dir, db) = fresh_db();
    let pool = DbPool::new(&db).unwrap();

    let id = queries::insert_record(&pool.conn, &water("05-06-24", 2)).unwrap();
    let raw: String = pool
        .conn
        .query_row("SELECT date FROM water_intake WHERE id = ?1", [id], |r| r.get(0))
        .unwrap();
    assert_eq!(raw, "2024-06-05");
}

#[test]
fn test_get_missing_record() {
    let (_dir, db) = fresh_db();
    let pool = DbPool::new(&db).unwrap();

    let err = queries::get_record(&pool.conn, HabitKind::Water, 3).unwrap_err();
    assert!(matches!(
        err,
        AppError::RecordNotFound {
            table: "water_intake",
            id: 3
        }
    ));
}

#[test]
fn test_update_and_delete_report_rows_affected() {
    let (_dir, db) = fresh_db();
    let pool = DbPool::new(&db).unwrap();

    assert_eq!(queries::delete_record(&pool.conn, HabitKind::Walking, 1).unwrap(), 0);
    assert_eq!(queries::update_record(&pool.conn, 1, &walk("01-01-24", 10, 0.1)).unwrap(), 0);

    let id = queries::insert_record(&pool.conn, &walk("01-01-24", 1000, 0.8)).unwrap();
    assert_eq!(queries::update_record(&pool.conn, id, &walk("02-01-24", 1500, 1.1)).unwrap(), 1);

    let r = queries::get_record(&pool.conn, HabitKind::Walking, id).unwrap();
    assert_eq!(r.date, d("02-01-24"));
    assert_eq!(r.metrics.primary(), 1500);

    assert_eq!(queries::delete_record(&pool.conn, HabitKind::Walking, id).unwrap(), 1);
}

#[test]
fn test_sums_and_daily_totals() {
    let (_dir, db) = fresh_db();
    let pool = DbPool::new(&db).unwrap();

    for r in [
        walk("01-01-24", 2000, 1.5),
        walk("01-01-24", 3000, 2.5),
        walk("03-01-24", 12000, 9.0),
    ] {
        queries::insert_record(&pool.conn, &r).unwrap();
    }

    let day = d("01-01-24");
    let steps = queries::sum_by_date(&pool.conn, HabitKind::Walking, MetricColumn::Primary, &day).unwrap();
    let km = queries::sum_by_date(&pool.conn, HabitKind::Walking, MetricColumn::Secondary, &day).unwrap();
    assert_eq!(steps, 5000.0);
    assert!((km - 4.0).abs() < 1e-9);

    let empty = queries::sum_by_date(&pool.conn, HabitKind::Walking, MetricColumn::Primary, &d("02-01-24")).unwrap();
    assert_eq!(empty, 0.0);

    let days = queries::daily_totals(&pool.conn, HabitKind::Walking, DateRange::All).unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].date, day);
    assert_eq!(days[0].entries, 2);
    assert_eq!(days[0].primary, 5000);
    assert_eq!(days[1].primary, 12000);

    let since = queries::aggregate(&pool.conn, HabitKind::Walking, DateRange::Since(d("02-01-24"))).unwrap();
    assert_eq!(since.entries, 1);
    assert_eq!(since.primary_total, 12000);
    assert!((since.secondary_total - 9.0).abs() < 1e-9);

    let between = queries::aggregate(
        &pool.conn,
        HabitKind::Walking,
        DateRange::Between(d("01-01-24"), d("01-01-24")),
    )
    .unwrap();
    assert_eq!(between.entries, 2);
}

#[test]
fn test_water_has_no_secondary_column() {
    let (_dir, db) = fresh_db();
    let pool = DbPool::new(&db).unwrap();

    let err = queries::sum_by_date(&pool.conn, HabitKind::Water, MetricColumn::Secondary, &d("01-01-24"));
    assert!(err.is_err());
}

#[test]
fn test_best_day_on_empty_table() {
    let (_dir, db) = fresh_db();
    let pool = DbPool::new(&db).unwrap();

    let err = queries::best_day(&pool.conn, HabitKind::Water, MetricColumn::Primary).unwrap_err();
    assert!(matches!(err, AppError::NoData("water_intake")));
}
