use crate::config::Config;
use crate::cli::render;
use crate::db::pool::DbPool;
use crate::db::stats::store_info;
use crate::errors::AppResult;

pub fn handle(json: bool, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;
    let info = store_info(&pool.conn, &cfg.database)?;

    if json {
        render::print_json(&info)
    } else {
        render::print_store_info(&info);
        Ok(())
    }
}
