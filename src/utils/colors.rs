/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Wrap `value` in the goal color and add a check mark when the goal is met.
pub fn colorize_goal(value: &str, met: bool, any: bool) -> String {
    if met {
        format!("{GREEN}{value}{RESET} ✅")
    } else if any {
        format!("{YELLOW}{value}{RESET}")
    } else {
        format!("{GREY}{value}{RESET}")
    }
}

/// Grey placeholder for missing optional text.
pub fn colorize_optional(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => format!("{GREY}--{RESET}"),
    }
}
