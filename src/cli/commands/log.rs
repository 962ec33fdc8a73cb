use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let pool = DbPool::new(&cfg.database)?;
        let lines = LogLogic::render(&pool)?;

        if lines.is_empty() {
            info("The internal log is empty.");
        }
        for line in lines {
            println!("{}", line);
        }
    }

    Ok(())
}
