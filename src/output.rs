//! Record rendering for the command line

use crate::distribution::{Column, ResolvedRecord, Source};
use serde_json::Value;
use std::io::Write;

/// Widest a table cell may get before it is truncated
const MAX_CELL_WIDTH: usize = 48;

/// Display text of one value in a table cell
pub fn value_to_cell(value: &Value) -> String {
    match value {
        Value::String(s) if s.is_empty() => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(_) => "[object]".to_string(),
    }
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

/// Render records as an aligned text table
pub fn render_table(columns: &[&str], records: &[ResolvedRecord]) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|name| {
                    let cell = record.get(name).map(value_to_cell).unwrap_or_else(|| "-".to_string());
                    truncate_string(&cell, MAX_CELL_WIDTH)
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(name.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |cells: &mut dyn Iterator<Item = String>| -> String {
        cells
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&format_row(&mut columns.iter().map(|c| c.to_uppercase())));
    out.push('\n');
    out.push_str(&format_row(&mut widths.iter().map(|w| "-".repeat(*w))));
    out.push('\n');
    for row in rows {
        out.push_str(&format_row(&mut row.into_iter()));
        out.push('\n');
    }
    out
}

/// Write one record as a single JSON line, keeping column order
pub fn write_json_line<W: Write>(writer: &mut W, record: &ResolvedRecord) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *writer, record)?;
    writer.write_all(b"\n")?;
    Ok(())
}

fn source_label(source: Source) -> &'static str {
    match source {
        Source::Summary => "summary",
        Source::Detail => "detail",
        Source::Tags => "tags",
        Source::Derived(_) => "derived",
    }
}

/// Render the column catalogue for `--list-columns`
pub fn render_column_list<'a>(columns: impl IntoIterator<Item = &'a Column>) -> String {
    let columns: Vec<&Column> = columns.into_iter().collect();
    let name_width = columns.iter().map(|c| c.name.len()).max().unwrap_or(0);

    columns
        .iter()
        .map(|c| {
            format!(
                "{:<name_width$}  {:<8}  {}\n",
                c.name,
                source_label(c.source),
                c.description,
                name_width = name_width
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::{get_column, COLUMNS};
    use serde_json::json;

    #[test]
    fn test_value_to_cell() {
        assert_eq!(value_to_cell(&json!("Deployed")), "Deployed");
        assert_eq!(value_to_cell(&json!("")), "-");
        assert_eq!(value_to_cell(&json!(3)), "3");
        assert_eq!(value_to_cell(&json!(false)), "false");
        assert_eq!(value_to_cell(&Value::Null), "-");
        assert_eq!(value_to_cell(&json!(["a", "b"])), "[2 items]");
        assert_eq!(value_to_cell(&json!({"env": "prod"})), "[object]");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("abcdefghij", 6), "abc...");
        assert_eq!(truncate_string("日本語のテキスト", 5), "日本...");
    }

    #[test]
    fn test_render_table_empty() {
        let table = render_table(&["id", "enabled"], &[]);
        assert_eq!(table, "ID  ENABLED\n--  -------\n");
    }

    #[test]
    fn test_column_list_has_every_column() {
        let listing = render_column_list(COLUMNS.iter());
        assert_eq!(listing.lines().count(), COLUMNS.len());
        assert!(listing.lines().any(|l| l.starts_with("e_tag") && l.contains("detail")));

        let single = render_column_list(get_column("tags"));
        assert!(single.starts_with("tags  derived"));
    }
}
