use crate::Session;
use crate::cli::render;
use crate::core::summary;
use crate::errors::AppResult;

pub fn handle(json: bool, session: &Session) -> AppResult<()> {
    let cfg = &session.cfg;
    let s = summary::build(
        &cfg.database,
        session.today,
        cfg.rolling_window_days,
        cfg.weekly_days,
    )?;

    if json {
        render::print_json(&s)
    } else {
        render::print_summary(&s);
        Ok(())
    }
}
