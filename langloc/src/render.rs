//! Rendering of reports as a text table, JSON or CSV

use console::Style;
use langloclib::{LOCTable, Report, TableRow};

/// Minimum width of a numeric column, so small counts still line up.
const MIN_NUMERIC_WIDTH: usize = 8;

/// Gap between columns
const GAP: &str = "  ";

/// Column widths: label column first, then one per value column.
fn column_widths(table: &LOCTable) -> Vec<usize> {
    let rows = || table.rows.iter().chain(std::iter::once(&table.footer));

    let mut widths = vec![rows()
        .map(|r| r.label.chars().count())
        .chain(table.headers.first().map(|h| h.chars().count()))
        .max()
        .unwrap_or(0)];

    for (col, numeric) in table.numeric.iter().enumerate() {
        let header = table.headers.get(col + 1).map_or(0, |h| h.chars().count());
        let data = rows()
            .filter_map(|r| r.values.get(col))
            .map(|v| v.chars().count())
            .max()
            .unwrap_or(0);
        let min = if *numeric { MIN_NUMERIC_WIDTH } else { 0 };
        widths.push(header.max(data).max(min));
    }

    widths
}

fn format_line(label: &str, values: &[String], widths: &[usize], numeric: &[bool]) -> String {
    let mut line = format!("{:<width$}", label, width = widths[0]);
    for (col, value) in values.iter().enumerate() {
        line.push_str(GAP);
        let width = widths[col + 1];
        if numeric.get(col).copied().unwrap_or(false) {
            line.push_str(&format!("{:>width$}", value, width = width));
        } else {
            line.push_str(&format!("{:<width$}", value, width = width));
        }
    }
    line.trim_end().to_string()
}

fn format_row(row: &TableRow, widths: &[usize], numeric: &[bool]) -> String {
    format_line(&row.label, &row.values, widths, numeric)
}

/// Render a table with a header, data rows and the TOTAL row last.
pub fn render_table(table: &LOCTable) -> String {
    let widths = column_widths(table);
    let full_width = widths.iter().sum::<usize>() + GAP.len() * (widths.len() - 1);
    let separator = "-".repeat(full_width);
    let header_style = Style::new().bold();

    let (label_header, value_headers) = match table.headers.split_first() {
        Some((first, rest)) => (first.as_str(), rest.to_vec()),
        None => ("", Vec::new()),
    };

    let mut output = String::new();
    let header = format_line(label_header, &value_headers, &widths, &table.numeric);
    output.push_str(&header_style.apply_to(header).to_string());
    output.push('\n');
    output.push_str(&separator);
    output.push('\n');

    for row in &table.rows {
        output.push_str(&format_row(row, &widths, &table.numeric));
        output.push('\n');
    }

    output.push_str(&separator);
    output.push('\n');
    output.push_str(&format_row(&table.footer, &widths, &table.numeric));
    output.push('\n');
    output
}

fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Render a table as CSV. Text fields are quoted, numbers are not.
pub fn render_csv(table: &LOCTable) -> String {
    let mut output = table
        .headers
        .iter()
        .map(|h| h.to_lowercase())
        .collect::<Vec<_>>()
        .join(",");
    output.push('\n');

    for row in table.rows.iter().chain(std::iter::once(&table.footer)) {
        let mut line = csv_field(&row.label);
        for (col, value) in row.values.iter().enumerate() {
            line.push(',');
            if table.numeric.get(col).copied().unwrap_or(false) {
                line.push_str(value);
            } else {
                line.push_str(&csv_field(value));
            }
        }
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Render the report itself as pretty JSON.
pub fn render_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> LOCTable {
        LOCTable {
            headers: vec!["Language".to_string(), "Lines".to_string()],
            numeric: vec![true],
            rows: vec![
                TableRow {
                    label: "C++".to_string(),
                    values: vec!["12345".to_string()],
                },
                TableRow {
                    label: "reStructuredText".to_string(),
                    values: vec!["7".to_string()],
                },
            ],
            footer: TableRow {
                label: "TOTAL".to_string(),
                values: vec!["12352".to_string()],
            },
        }
    }

    #[test]
    fn test_render_table_alignment() {
        console::set_colors_enabled(false);
        let out = render_table(&sample_table());
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "Language             Lines");
        assert_eq!(lines[2], "C++                  12345");
        assert_eq!(lines[3], "reStructuredText         7");
        assert_eq!(lines[5], "TOTAL                12352");
        assert_eq!(lines[1].len(), lines[2].len());
    }

    #[test]
    fn test_render_csv() {
        let out = render_csv(&sample_table());
        assert_eq!(
            out,
            "language,lines\n\"C++\",12345\n\"reStructuredText\",7\n\"TOTAL\",12352\n"
        );
    }

    #[test]
    fn test_render_csv_text_column_quoted() {
        let table = LOCTable {
            headers: vec!["File".into(), "Language".into(), "Lines".into()],
            numeric: vec![false, true],
            rows: vec![TableRow {
                label: "a \"b\".py".into(),
                values: vec!["Python".into(), "3".into()],
            }],
            footer: TableRow {
                label: "TOTAL".into(),
                values: vec!["1 files".into(), "3".into()],
            },
        };
        let out = render_csv(&table);
        assert!(out.contains("\"a \"\"b\"\".py\",\"Python\",3\n"));
        assert!(out.ends_with("\"TOTAL\",\"1 files\",3\n"));
    }
}
