//! Table-ready data structures for line count output.
//!
//! This module provides `LOCTable`, a presentation-ready data structure
//! that renderers consume directly.
//!
//! The data flow is:
//! 1. Raw Data (CountResult)
//! 2. Report (filtered, sorted, totalled)
//! 3. LOCTable (formatted strings for display)
//!
//! LOCTable is a pure presentation layer - it only formats data, no filtering
//! or sorting logic.

use serde::{Deserialize, Serialize};

use crate::query::options::Aggregation;
use crate::query::report::Report;

/// Label of the grand-total row.
pub const TOTAL_LABEL: &str = "TOTAL";

/// A single row in the table (data row or footer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Row label (language name, file path or "TOTAL")
    pub label: String,
    /// Values for each value column (as strings, ready for display)
    pub values: Vec<String>,
}

/// Table-ready line count data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LOCTable {
    /// Column headers: [label_header, value_header1, ...]
    pub headers: Vec<String>,
    /// Per value column: true when the column holds numbers (right-aligned)
    pub numeric: Vec<bool>,
    /// Data rows
    pub rows: Vec<TableRow>,
    /// Grand total row, always last
    pub footer: TableRow,
}

impl LOCTable {
    /// Create a LOCTable from a Report.
    ///
    /// The Report already holds sorted, totalled data. This method just
    /// formats it into displayable strings.
    pub fn from_report(report: &Report) -> Self {
        match report.aggregation {
            Aggregation::ByLanguage => LOCTable {
                headers: vec!["Language".to_string(), "Lines".to_string()],
                numeric: vec![true],
                rows: report
                    .buckets
                    .iter()
                    .map(|b| TableRow {
                        label: b.language.clone(),
                        values: vec![b.lines.to_string()],
                    })
                    .collect(),
                footer: TableRow {
                    label: TOTAL_LABEL.to_string(),
                    values: vec![report.total.to_string()],
                },
            },
            Aggregation::ByFile => LOCTable {
                headers: vec![
                    "File".to_string(),
                    "Language".to_string(),
                    "Lines".to_string(),
                ],
                numeric: vec![false, true],
                rows: report
                    .files
                    .iter()
                    .map(|f| TableRow {
                        label: f.label.clone(),
                        values: vec![f.language.clone(), f.lines.to_string()],
                    })
                    .collect(),
                footer: TableRow {
                    label: TOTAL_LABEL.to_string(),
                    values: vec![
                        format!("{} files", report.file_count),
                        report.total.to_string(),
                    ],
                },
            },
        }
    }

    /// Number of value columns (excluding the label column).
    pub fn value_columns(&self) -> usize {
        self.numeric.len()
    }
}
