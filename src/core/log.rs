use crate::db::log::{LogEntry, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::table::visible_width;
use ansi_term::Colour;

const OP_MAX_WIDTH: usize = 40;

/// Color used for each operation name.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "edit" => Colour::Yellow,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    /// Render the audit log as aligned, colored lines (oldest first).
    pub fn render(pool: &DbPool) -> AppResult<Vec<String>> {
        let entries = load_log(&pool.conn)?;
        Ok(Self::render_entries(&entries))
    }

    pub fn render_entries(entries: &[LogEntry]) -> Vec<String> {
        let op_target = |e: &LogEntry| {
            if e.target.is_empty() {
                e.operation.clone()
            } else {
                format!("{} ({})", e.operation, e.target)
            }
        };

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);
        let op_w = entries
            .iter()
            .map(|e| op_target(e).len())
            .max()
            .unwrap_or(10)
            .min(OP_MAX_WIDTH);

        entries
            .iter()
            .map(|e| {
                let mut text = op_target(e);
                if text.chars().count() > OP_MAX_WIDTH {
                    text = text.chars().take(OP_MAX_WIDTH - 3).collect::<String>() + "...";
                }

                // only the operation word is colored
                let colored = match text.split_once(' ') {
                    Some((op, rest)) => {
                        format!("{} {}", color_for_operation(&e.operation).paint(op), rest)
                    }
                    None => color_for_operation(&e.operation).paint(text.as_str()).to_string(),
                };
                let padding = " ".repeat(op_w.saturating_sub(visible_width(&colored)));

                format!(
                    "{:>id_w$}: {:<date_w$} | {}{} => {}",
                    e.id,
                    e.date,
                    colored,
                    padding,
                    e.message,
                    id_w = id_w,
                    date_w = date_w
                )
            })
            .collect()
    }
}
