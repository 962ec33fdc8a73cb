//! Table rendering utilities for CLI outputs.

use regex::Regex;
use std::sync::OnceLock;
use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    pub width: usize,
}

impl Column {
    pub fn new(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    pub separator: char,
}

fn ansi_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI regex"))
}

/// Width of `s` as seen on the terminal (ANSI codes excluded).
pub fn visible_width(s: &str) -> usize {
    ansi_re().replace_all(s, "").width()
}

fn pad(s: &str, width: usize) -> String {
    let w = visible_width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - w))
    }
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            separator: '-',
        }
    }

    pub fn with_separator(mut self, c: char) -> Self {
        self.separator = c;
        self
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        // Header
        for col in &self.columns {
            out.push_str(&pad(&col.header, col.width));
            out.push(' ');
        }
        out.push('\n');

        let total: usize = self.columns.iter().map(|c| c.width + 1).sum();
        out.push_str(&self.separator.to_string().repeat(total));
        out.push('\n');

        // Rows: the last column wraps, the others are padded
        for row in &self.rows {
            let last = self.columns.len().saturating_sub(1);
            let mut continuation: Vec<String> = Vec::new();

            for (i, col) in self.columns.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                if i == last && visible_width(cell) > col.width {
                    let mut lines = textwrap::wrap(cell, col.width).into_iter();
                    out.push_str(&lines.next().unwrap_or_default());
                    continuation = lines.map(|l| l.into_owned()).collect();
                } else {
                    out.push_str(&pad(cell, col.width));
                    out.push(' ');
                }
            }
            out.push('\n');

            let indent: usize = self.columns[..last].iter().map(|c| c.width + 1).sum();
            for line in continuation {
                out.push_str(&" ".repeat(indent));
                out.push_str(&line);
                out.push('\n');
            }
        }

        out
    }
}
