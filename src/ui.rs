//! Terminal UI utilities.
//!
//! A small box-drawn table used for the end-of-run summary. Column widths
//! shrink to fit the terminal, never below 8 characters.

use colored::*;
use console::{measure_text_width, truncate_str};

const MIN_COL: usize = 8;

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Rows with the wrong number of cells are dropped.
    pub fn add_row(&mut self, row: Vec<String>) {
        if row.len() == self.headers.len() {
            self.rows.push(row);
        }
    }

    pub fn print(&self) {
        let (_, term_width) = console::Term::stdout().size();
        for line in self.render(term_width as usize) {
            println!("{}", line);
        }
    }

    pub fn render(&self, max_width: usize) -> Vec<String> {
        if self.headers.is_empty() {
            return Vec::new();
        }
        let widths = self.column_widths(max_width);

        let sep = |left: &str, mid: &str, right: &str| {
            let cols: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("  {}{}{}", left, cols.join(mid), right)
        };
        let row_line = |cells: &[String], bold: bool| {
            let mut line = String::from("  │");
            for (cell, &width) in cells.iter().zip(&widths) {
                let text = truncate_str(&sanitize(cell), width, "...").into_owned();
                let pad = width.saturating_sub(measure_text_width(&text));
                let text = if bold { text.bold().to_string() } else { text };
                line.push_str(&format!(" {}{} │", text, " ".repeat(pad)));
            }
            line
        };

        let mut lines = vec![sep("┌", "┬", "┐"), row_line(&self.headers, true)];
        lines.push(sep("├", "┼", "┤"));
        lines.extend(self.rows.iter().map(|r| row_line(r, false)));
        lines.push(sep("└", "┴", "┘"));
        lines
    }

    fn column_widths(&self, max_width: usize) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| measure_text_width(h)).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(measure_text_width(&sanitize(cell)));
            }
        }

        let overhead = 3 + 3 * widths.len();
        let available = max_width.saturating_sub(overhead);
        while widths.iter().sum::<usize>() > available {
            let Some(widest) = widths.iter_mut().filter(|w| **w > MIN_COL).max() else {
                break;
            };
            *widest -= 1;
        }
        widths
    }
}

fn sanitize(s: &str) -> String {
    s.replace(['\n', '\r', '\t'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(lines: Vec<String>) -> Vec<String> {
        lines
            .into_iter()
            .map(|l| console::strip_ansi_codes(&l).into_owned())
            .collect()
    }

    #[test]
    fn test_render_aligns_columns() {
        let mut table = Table::new(&["Step", "Result"]);
        table.add_row(vec!["configure".into(), "ok".into()]);
        table.add_row(vec!["compile".into(), "failed (exit 2)".into()]);

        let lines = plain(table.render(120));
        assert_eq!(lines.len(), 6);
        let width = measure_text_width(&lines[0]);
        assert!(lines.iter().all(|l| measure_text_width(l) == width));
        assert!(lines[3].contains("configure"));
        assert!(lines[4].contains("failed (exit 2)"));
    }

    #[test]
    fn test_wrong_row_length_is_dropped() {
        let mut table = Table::new(&["A", "B"]);
        table.add_row(vec!["only one".into()]);
        assert_eq!(table.render(80).len(), 4);
    }

    #[test]
    fn test_narrow_terminal_truncates() {
        let mut table = Table::new(&["Name", "Value"]);
        table.add_row(vec!["x".repeat(60), "y".repeat(60)]);
        let lines = plain(table.render(40));
        assert!(lines[3].contains("..."));
        assert!(measure_text_width(&lines[3]) <= 40);
    }
}
