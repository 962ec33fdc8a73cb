//! Terminal rendering of the plain data returned by the core.

use crate::core::conversion::{calories_from_steps, glasses_to_ml, goal_percent, walking_minutes};
use crate::core::summary::{CombinedSummary, Insight};
use crate::core::tracker::AddOutcome;
use crate::errors::{AppError, AppResult};
use crate::models::habit::HabitKind;
use crate::models::record::{Metrics, Record};
use crate::models::stats::{DayPoint, HabitStatistics, Progress, ProgressTier, StoreInfo};
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW, colorize_goal, colorize_optional};
use crate::utils::date;
use crate::utils::formatting::{km, minutes_readable, optional_average, progress_bar, thousands};
use crate::utils::table::{Column, Table};
use serde::Serialize;

const BAR_WIDTH: usize = 30;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    let out = serde_json::to_string_pretty(value).map_err(|e| AppError::Other(e.to_string()))?;
    println!("{}", out);
    Ok(())
}

fn amount(m: &Metrics) -> String {
    match *m {
        Metrics::Water { glasses } => format!("{} ({} ml)", glasses, thousands(glasses_to_ml(glasses))),
        Metrics::Walking { steps, distance_km } => format!("{} / {}", thousands(steps), km(distance_km)),
    }
}

pub fn print_records(kind: HabitKind, records: &[Record], separator: char) {
    let profile = kind.profile();
    if records.is_empty() {
        info(format!("No {} records yet.", profile.label.to_lowercase()));
        return;
    }

    let amount_header = match kind {
        HabitKind::Water => "Glasses",
        HabitKind::Walking => "Steps / Distance",
    };

    let mut table = Table::new(vec![
        Column::new("ID", 5),
        Column::new("Date", 9),
        Column::new(amount_header, 22),
        Column::new("Description", 40),
    ])
    .with_separator(separator);

    for r in records {
        table.add_row(vec![
            r.id.to_string(),
            r.date_str(),
            amount(&r.metrics),
            colorize_optional(r.description.as_deref()),
        ]);
    }

    header(format!("{} {}", kind.icon(), profile.label));
    print!("{}", table.render());
    println!("{} record(s)", records.len());
}

fn tier_message(kind: HabitKind, tier: ProgressTier) -> &'static str {
    match (kind, tier) {
        (HabitKind::Water, ProgressTier::GoalMet) => "🎉 Daily hydration goal reached!",
        (HabitKind::Walking, ProgressTier::GoalMet) => "🎉 Daily step goal reached!",
        (_, ProgressTier::AlmostThere) => "💪 Almost there, keep going!",
        (_, ProgressTier::Halfway) => "👍 Good progress, halfway to your goal!",
        (_, ProgressTier::GettingStarted) => "🌱 Every bit counts, keep it up!",
    }
}

pub fn print_progress(p: &Progress) {
    let profile = p.habit.profile();
    println!(
        "\n📅 {} progress for {}",
        profile.label,
        date::format_display(&p.date)
    );
    println!(
        "   [{}] {:.0}%",
        progress_bar(p.percent, BAR_WIDTH),
        p.percent
    );
    println!(
        "   {} / {} {}",
        thousands(p.primary),
        thousands(p.goal),
        profile.primary_unit
    );

    match p.habit {
        HabitKind::Water => {
            println!("   Total water: {} ml 💧", thousands(glasses_to_ml(p.primary)));
        }
        HabitKind::Walking => {
            let dist = p.secondary.unwrap_or_default();
            let km_goal = profile.secondary_goal.unwrap_or_default();
            println!(
                "   Distance: {} of {} ({:.0}%)",
                km(dist),
                km(km_goal),
                goal_percent(dist, km_goal)
            );
        }
    }

    if p.goal_met {
        println!("   {GREEN}{}{RESET}", tier_message(p.habit, p.tier));
    } else {
        println!("   {YELLOW}{}{RESET}", tier_message(p.habit, p.tier));
        println!(
            "   {} more {} to reach your daily goal.",
            thousands(p.remaining),
            profile.primary_unit
        );
    }
}

pub fn print_add_feedback(out: &AddOutcome) {
    let r = &out.record;
    match r.metrics {
        Metrics::Water { glasses } => success(format!(
            "Logged {} glass(es) of water on {} (record #{}).",
            glasses,
            r.date_str(),
            r.id
        )),
        Metrics::Walking { steps, distance_km } => {
            success(format!(
                "Logged {} steps ({}) on {} (record #{}).",
                thousands(steps),
                km(distance_km),
                r.date_str(),
                r.id
            ));
            println!(
                "   🔥 ~{:.0} kcal burned, ⏱️  ~{} of walking",
                calories_from_steps(steps),
                minutes_readable(walking_minutes(distance_km))
            );
        }
    }
    print_progress(&out.progress);
}

pub fn print_statistics(s: &HabitStatistics) {
    let kind = s.overall.habit;
    let profile = kind.profile();
    header(format!("{} {} statistics", kind.icon(), profile.label));

    println!("{CYAN}📋 Total entries:{RESET} {}", thousands(s.overall.total_entries));
    match kind {
        HabitKind::Water => {
            println!("{CYAN}🥤 Total glasses:{RESET} {}", thousands(s.overall.total_primary));
            println!(
                "{CYAN}💧 Total water:{RESET} {} ml",
                thousands(glasses_to_ml(s.overall.total_primary))
            );
        }
        HabitKind::Walking => {
            println!("{CYAN}👣 Total steps:{RESET} {}", thousands(s.overall.total_primary));
            println!(
                "{CYAN}🏃 Total distance:{RESET} {}",
                km(s.overall.total_secondary.unwrap_or_default())
            );
        }
    }
    println!(
        "{CYAN}📊 Average per entry:{RESET} {} {}",
        optional_average(s.overall.average_per_entry, 1),
        profile.primary_unit
    );
    println!(
        "{CYAN}📈 Daily average (last {} days, active days only):{RESET} {} {}",
        s.rolling_window_days,
        optional_average(s.rolling_average, 1),
        profile.primary_unit
    );
    println!(
        "{CYAN}🎯 Goal days (≥ {} {}):{RESET} {}",
        thousands(s.goal),
        profile.primary_unit,
        s.goal_days
    );

    match &s.best_day {
        Some(best) => {
            let extra = match kind {
                HabitKind::Water => format!("{} ml", thousands(glasses_to_ml(best.primary))),
                HabitKind::Walking => km(best.secondary),
            };
            println!(
                "{CYAN}🏆 Best day:{RESET} {} - {} {} ({})",
                date::format_display(&best.date),
                thousands(best.primary),
                profile.primary_unit,
                extra
            );
        }
        None => println!("{CYAN}🏆 Best day:{RESET} no data"),
    }

    print_progress(&s.today);
}

pub fn print_weekly(kind: HabitKind, points: &[DayPoint]) {
    let profile = kind.profile();
    header(format!("{} Weekly progress ({} days)", kind.icon(), points.len()));

    let goal = profile.daily_goal as f64;
    for p in points {
        let value = thousands(p.primary);
        let shown = colorize_goal(&value, p.goal_met, p.primary > 0);
        let extra = p.secondary.map(|d| format!("  {}", km(d))).unwrap_or_default();
        println!(
            "{}  [{}] {} {}{}",
            date::short_label(&p.date),
            progress_bar(goal_percent(p.primary as f64, goal), 20),
            shown,
            profile.primary_unit,
            extra
        );
    }

    let met = points.iter().filter(|p| p.goal_met).count();
    println!("\nGoal met on {} of {} days.", met, points.len());
}

pub fn print_summary(s: &CombinedSummary) {
    print_statistics(&s.water);
    println!();
    print_statistics(&s.walking);

    header("🧠 Health insights");
    let verdict = match s.insight {
        Insight::BothGoals => format!("{GREEN}🎉 Excellent! Both daily goals achieved today!{RESET}"),
        Insight::WaterOnly => format!(
            "{CYAN}💧 Great hydration today! Add some steps to reach your walking goal.{RESET}"
        ),
        Insight::StepsOnly => {
            format!("{GREEN}👣 Great walking today! Don't forget to stay hydrated.{RESET}")
        }
        Insight::KeepGoing => {
            format!("{YELLOW}💪 Keep going! You can still reach your daily goals.{RESET}")
        }
    };
    println!("{}", verdict);

    header("📈 Weekly overview");
    let mut table = Table::new(vec![
        Column::new("Date", 8),
        Column::new("Water", 12),
        Column::new("Steps", 14),
        Column::new("Goals met", 12),
    ]);
    for d in &s.week {
        let goals = match (d.water_met, d.steps_met) {
            (true, true) => "Both ✅✅",
            (true, false) => "Water ✅",
            (false, true) => "Steps ✅",
            (false, false) => "None",
        };
        table.add_row(vec![
            date::short_label(&d.date),
            colorize_goal(&d.water.to_string(), d.water_met, d.water > 0),
            colorize_goal(&thousands(d.steps), d.steps_met, d.steps > 0),
            goals.to_string(),
        ]);
    }
    print!("{}", table.render());
}

pub fn print_store_info(info: &StoreInfo) {
    header("🗄️  Database");
    println!("{CYAN}• File:{RESET} {YELLOW}{}{RESET}", info.path);
    println!("{CYAN}• Size:{RESET} {:.1} KB", info.size_bytes as f64 / 1024.0);

    for h in &info.habits {
        println!(
            "{CYAN}• {} {}:{RESET} {} record(s)",
            h.habit.icon(),
            h.table,
            thousands(h.entries)
        );
        match (h.first, h.last) {
            (Some(first), Some(last)) => println!(
                "    from {} to {}",
                date::format_display(&first),
                date::format_display(&last)
            ),
            _ => println!("    {GREY}no entries yet{RESET}"),
        }
    }
}
