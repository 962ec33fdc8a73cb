//! Formatting utilities used for CLI outputs.

/// Thousands separator, e.g. `12000` → `12,000`.
pub fn thousands(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if n < 0 { format!("-{}", out) } else { out }
}

pub fn km(value: f64) -> String {
    format!("{:.2} km", value)
}

pub fn optional_average(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "--".to_string(),
    }
}

/// Text progress bar, `width` cells wide.
pub fn progress_bar(percent: f64, width: usize) -> String {
    let ratio = (percent / 100.0).clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Minutes as `1h 05m` (or `42m` under an hour).
pub fn minutes_readable(mins: f64) -> String {
    let total = mins.round() as i64;
    let (h, m) = (total / 60, total % 60);
    if h > 0 {
        format!("{}h {:02}m", h, m)
    } else {
        format!("{}m", m)
    }
}
