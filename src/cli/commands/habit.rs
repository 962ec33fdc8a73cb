use crate::Session;
use crate::cli::parser::HabitAction;
use crate::cli::render;
use crate::core::input::{MetricInput, RecordId, RecordPatch, parse_date_input};
use crate::core::tracker::{AddRequest, HabitTracker, RowOutcome};
use crate::errors::{AppError, AppResult};
use crate::models::habit::HabitKind;
use crate::ui::messages::{info, success, warning};
use chrono::NaiveDate;
use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

/// Map the add flags onto a tracking mode (steps, distance or both).
fn metric_from_flags(
    glasses: Option<i64>,
    steps: Option<i64>,
    km: Option<f64>,
) -> AppResult<MetricInput> {
    match (glasses, steps, km) {
        (Some(g), None, None) => Ok(MetricInput::Glasses(g)),
        (None, Some(s), None) => Ok(MetricInput::Steps(s)),
        (None, None, Some(k)) => Ok(MetricInput::Distance(k)),
        (None, Some(s), Some(k)) => Ok(MetricInput::Both {
            steps: s,
            distance_km: k,
        }),
        (None, None, None) => Err(AppError::Validation(
            "Nothing to record: use --glasses for water, --steps and/or --km for walking".into(),
        )),
        _ => Err(AppError::Validation(
            "--glasses cannot be combined with --steps or --km".into(),
        )),
    }
}

/// Parse an optional date flag; cancelling is not meaningful there.
fn optional_date(raw: &Option<String>, today: NaiveDate) -> AppResult<Option<NaiveDate>> {
    match raw {
        Some(s) => parse_date_input(s, today)?
            .map(Some)
            .ok_or_else(|| AppError::InvalidDate(s.clone())),
        None => Ok(None),
    }
}

pub fn handle(kind: HabitKind, action: &HabitAction, session: &Session) -> AppResult<()> {
    let cfg = &session.cfg;
    let tracker = HabitTracker::new(kind, &cfg.database, session.today);

    match action {
        HabitAction::Add {
            date,
            glasses,
            steps,
            km,
            description,
        } => {
            let Some(day) = parse_date_input(date, session.today)? else {
                info("Operation cancelled.");
                return Ok(());
            };
            let metric = metric_from_flags(*glasses, *steps, *km)?;

            let out = tracker.add(AddRequest {
                date: day,
                metric,
                description: description.clone(),
            })?;
            render::print_add_feedback(&out);
        }

        HabitAction::List { weekly, json } => {
            let records = tracker.view()?;
            if *json {
                render::print_json(&records)?;
            } else {
                render::print_records(kind, &records, cfg.separator());
            }
            if *weekly {
                let points = tracker.weekly(cfg.weekly_days)?;
                if *json {
                    render::print_json(&points)?;
                } else {
                    render::print_weekly(kind, &points);
                }
            }
        }

        HabitAction::Recent { limit } => {
            let records = tracker.recent(limit.unwrap_or(cfg.recent_limit))?;
            render::print_records(kind, &records, cfg.separator());
        }

        HabitAction::Del { id, yes } => {
            let Some(id) = RecordId::parse(*id)? else {
                info("Operation cancelled.");
                return Ok(());
            };

            if !*yes {
                let record = match tracker.find(id) {
                    Ok(record) => record,
                    Err(AppError::RecordNotFound { .. }) => {
                        warning(format!(
                            "Record #{} not found. Nothing was deleted.",
                            id.get()
                        ));
                        return Ok(());
                    }
                    Err(e) => return Err(e),
                };
                let prompt = format!(
                    "Delete {} record #{} of {}? This action is irreversible.",
                    record.kind().code(),
                    record.id,
                    record.date_str()
                );
                if !ask_confirmation(&prompt) {
                    info("Operation cancelled.");
                    return Ok(());
                }
            }

            match tracker.delete(id)? {
                RowOutcome::Changed => success(format!("Record #{} has been deleted.", id.get())),
                RowOutcome::Missing => warning(format!(
                    "Record #{} not found. Nothing was deleted.",
                    id.get()
                )),
            }
        }

        HabitAction::Update {
            id,
            date,
            glasses,
            steps,
            km,
            description,
            clear_desc,
        } => {
            let Some(id) = RecordId::parse(*id)? else {
                info("Operation cancelled.");
                return Ok(());
            };

            let patch = RecordPatch {
                date: optional_date(date, session.today)?,
                glasses: *glasses,
                steps: *steps,
                distance_km: *km,
                description: if *clear_desc {
                    Some(None)
                } else {
                    description.clone().map(Some)
                },
            };
            if patch.is_empty() {
                warning("Nothing to update: pass at least one field to change.");
                return Ok(());
            }

            let out = tracker.update(id, &patch)?;
            match (out.outcome, out.after) {
                (RowOutcome::Changed, Some(after)) => {
                    success(format!("Record #{} updated.", after.id));
                    render::print_records(kind, &[out.before, after], cfg.separator());
                }
                _ => warning(format!(
                    "No rows were updated. Record #{} may have been deleted.",
                    id.get()
                )),
            }
        }

        HabitAction::Stats { weekly, json } => {
            let stats = tracker.statistics(cfg.rolling_window_days)?;
            if *json {
                render::print_json(&stats)?;
            } else {
                render::print_statistics(&stats);
            }
            if *weekly {
                let points = tracker.weekly(cfg.weekly_days)?;
                if *json {
                    render::print_json(&points)?;
                } else {
                    render::print_weekly(kind, &points);
                }
            }
        }

        HabitAction::Weekly { days, json } => {
            let points = tracker.weekly(days.unwrap_or(cfg.weekly_days))?;
            if *json {
                render::print_json(&points)?;
            } else {
                render::print_weekly(kind, &points);
            }
        }

        HabitAction::Today { date, json } => {
            let day = optional_date(date, session.today)?;
            let progress = tracker.progress(day)?;
            if *json {
                render::print_json(&progress)?;
            } else {
                render::print_progress(&progress);
            }
        }
    }

    Ok(())
}
