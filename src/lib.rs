//! habitlogger library root.
//! Exposes the CLI parser, the high-level `run()` function and the
//! storage, aggregation and tracking modules behind it.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use chrono::NaiveDate;
use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::{AppError, AppResult};
use models::habit::HabitKind;
use utils::date;

/// State shared by every command of one run (or one interactive session).
#[derive(Debug, Clone)]
pub struct Session {
    pub cfg: Config,
    /// Captured once at start-up so that a session crossing midnight stays consistent.
    pub today: NaiveDate,
}

/// Central command dispatcher
pub fn dispatch(cmd: &Commands, session: &Session) -> AppResult<()> {
    match cmd {
        Commands::Water { action } => cli::commands::habit::handle(HabitKind::Water, action, session),
        Commands::Walk { action } => cli::commands::habit::handle(HabitKind::Walking, action, session),
        Commands::Summary { json } => cli::commands::summary::handle(*json, session),
        Commands::Config { .. } => cli::commands::config::handle(cmd, &session.cfg),
        Commands::Info { json } => cli::commands::info::handle(*json, &session.cfg),
        Commands::Log { .. } => cli::commands::log::handle(cmd, &session.cfg),
        Commands::Shell => cli::commands::shell::handle(session),
        Commands::Init => Err(AppError::Validation(
            "`init` cannot run inside an interactive session".to_string(),
        )),
    }
}

fn execute(cli: &Cli) -> AppResult<()> {
    if matches!(cli.command, Commands::Init) {
        return cli::commands::init::handle(cli);
    }

    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    let today = match &cli.today {
        Some(raw) => date::parse_display(raw).ok_or_else(|| AppError::InvalidDate(raw.clone()))?,
        None => date::today(),
    };

    // every command except `config` needs the tables to be there
    if !matches!(cli.command, Commands::Config { .. }) {
        db::initialize::ensure_database(&cfg.database)?;
    }

    let session = Session { cfg, today };
    dispatch(&cli.command, &session)
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let result = execute(&cli);
    if let Err(e) = &result {
        ui::messages::report(e);
    }
    result
}
