use blueprint_core::options::{ConfigWarning, WarnLevel};
use serde::Serialize;
use std::path::Path;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Left-aligned columns separated by two spaces, with a dashed rule under
/// the header. Cells past the header count are dropped.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.len())
                .fold(h.len(), usize::max)
        })
        .collect();

    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    let mut out = pad_row(headers.iter().copied(), &widths);
    out.push_str(&pad_row(rule.iter().map(String::as_str), &widths));
    for row in rows {
        out.push_str(&pad_row(row.iter().map(String::as_str), &widths));
    }
    out
}

fn pad_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:w$}"))
        .collect();
    format!("{}\n", padded.join("  ").trim_end())
}

pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    print!("{}", render_table(headers, rows));
}

/// One `[warning]`/`[error]` line per options problem.
pub fn print_warnings(warnings: &[ConfigWarning]) {
    for w in warnings {
        let prefix = match w.level {
            WarnLevel::Warning => "warning",
            WarnLevel::Error => "error",
        };
        println!("[{prefix}] {}", w.message);
    }
}

/// `created:` or `exists:` status line for a generated file.
pub fn print_file_status(path: &Path, created: bool) {
    let status = if created { "created:" } else { "exists: " };
    println!("{status} {}", path.display());
}
