//! Console tables for audit results.
//!
//! Renders two-column boxed tables to any `std::io::Write` destination,
//! optionally colored when writing to a terminal.

use super::types::{AuditSummary, ReferenceSetRow};
use std::io::{self, Write};
use term::color::Color;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a value cell may get before it is truncated
const MAX_VALUE_WIDTH: usize = 60;

/// Writer for table output - configurable for color/plain text
pub struct TableWriter<W: Write> {
    writer: W,
    use_colors: bool,
}

impl<W: Write> TableWriter<W> {
    pub fn new(writer: W, use_colors: bool) -> Self {
        Self { writer, use_colors }
    }

    fn write_colored(&mut self, text: &str, color: Color) -> io::Result<()> {
        if self.use_colors {
            if let Some(ref mut t) = term::stdout() {
                let _ = t.fg(color);
                let _ = t.write_all(text.as_bytes());
                let _ = t.reset();
                return Ok(());
            }
        }
        write!(self.writer, "{}", text)
    }

    /// Write a boxed two-column table with a title row
    pub fn write_table(&mut self, title: &str, rows: &[(String, String)]) -> io::Result<()> {
        let key_width = rows.iter().map(|(k, _)| k.width()).chain([title.width()]).max().unwrap_or(0);
        let value_width = rows.iter().map(|(_, v)| v.width().min(MAX_VALUE_WIDTH)).max().unwrap_or(0);

        writeln!(self.writer, "┌{:─<w1$}┬{:─<w2$}┐", "", "", w1 = key_width + 2, w2 = value_width + 2)?;
        write!(self.writer, "│ ")?;
        self.write_colored(&pad(title, key_width), term::color::BRIGHT_CYAN)?;
        writeln!(self.writer, " │ {} │", pad("", value_width))?;
        writeln!(self.writer, "├{:─<w1$}┼{:─<w2$}┤", "", "", w1 = key_width + 2, w2 = value_width + 2)?;

        for (key, value) in rows {
            writeln!(
                self.writer,
                "│ {} │ {} │",
                pad(key, key_width),
                pad(&truncate(value, MAX_VALUE_WIDTH), value_width)
            )?;
        }

        writeln!(self.writer, "└{:─<w1$}┴{:─<w2$}┘", "", "", w1 = key_width + 2, w2 = value_width + 2)
    }

    pub fn write_summary(&mut self, summary: &AuditSummary) -> io::Result<()> {
        self.write_table("Audit summary", &summary.table_rows())
    }

    /// Rules feeding reference sets, as `name -> target (N tests)`
    pub fn write_reference_sets(&mut self, rows: &[ReferenceSetRow]) -> io::Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let table: Vec<(String, String)> = rows
            .iter()
            .map(|row| {
                let status = if row.enabled { "" } else { " [disabled]" };
                (row.name.clone(), format!("{} ({} tests){}", row.reference_set_target, row.test_count, status))
            })
            .collect();
        self.write_table("Reference set rules", &table)
    }
}

/// Pad to a display width, counting wide characters correctly
fn pad(s: &str, width: usize) -> String {
    let current = s.width();
    if current >= width { s.to_string() } else { format!("{}{}", s, " ".repeat(width - current)) }
}

/// Cut to a display width, marking the cut with an ellipsis
fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Print the run summary and reference-set rules to stdout
pub fn print_summary(summary: &AuditSummary, reference_sets: &[ReferenceSetRow], use_colors: bool) {
    let stdout = io::stdout();
    let mut writer = TableWriter::new(stdout.lock(), use_colors);
    let _ = writer.write_summary(summary);
    let _ = writer.write_reference_sets(reference_sets);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(rows: &[(String, String)]) -> String {
        let mut buf = Vec::new();
        TableWriter::new(&mut buf, false).write_table("Title", rows).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_rows_are_aligned() {
        let out = render(&[("a".to_string(), "1".to_string()), ("longer key".to_string(), "22".to_string())]);
        let widths: Vec<usize> = out.lines().map(|l| l.width()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "uneven table:\n{}", out);
        assert!(out.contains("│ longer key │ 22 │"));
    }

    #[test]
    fn test_long_values_are_truncated() {
        let long = "x".repeat(200);
        let out = render(&[("k".to_string(), long)]);
        assert!(out.contains('…'));
        assert!(out.lines().all(|l| l.width() <= MAX_VALUE_WIDTH + 20));
    }

    #[test]
    fn test_pad_counts_wide_characters() {
        assert_eq!(pad("日本", 6).width(), 6);
        assert_eq!(truncate("abcdef", 4), "abc…");
    }
}
