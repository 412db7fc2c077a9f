//! # langloclib
//!
//! A lines-of-code counter that breaks a source tree down by language.
//!
//! ## Overview
//!
//! The library walks a directory, classifies each file by name or extension,
//! counts its physical lines (newline bytes, the figure `wc -l` reports) and
//! aggregates one bucket per language plus a grand total.
//!
//! The pipeline has four stages:
//!
//! - **source**: discover files (ignore rules, skip-list, glob filters) and
//!   classify them
//! - **data**: count lines and aggregate [`LanguageBucket`]s
//! - **query**: sort and total into a [`Report`]
//! - **output**: format into a [`LOCTable`]
//!
//! ## Features
//!
//! - **Byte-safe counting**: content is never decoded, so binary or
//!   mis-encoded files cannot fail a run
//! - **Non-fatal skips**: unreadable files are reported as warnings
//! - **Configurable table**: extension/file name overrides, unknown-file policy
//! - **Optional parallelism**: same output as a sequential run
//!
//! ## Example
//!
//! ```rust
//! use langloclib::{count_directory, CountOptions, Report, ReportOptions};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::write(dir.path().join("a.py"), "x = 1\ny = 2\nz = 3\n").unwrap();
//!
//! let result = count_directory(dir.path(), CountOptions::new()).unwrap();
//! let report = Report::from_result(&result, &ReportOptions::new());
//!
//! assert_eq!(report.buckets.len(), 1);
//! assert_eq!(report.buckets[0].language, "Python");
//! assert_eq!(report.total, 3);
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod output;
pub mod query;
pub mod source;

pub use config::ConfigFile;
pub use data::{
    count_directory, count_file_lines, CountOptions, CountResult, FileStats, FileWarning,
    LanguageBucket,
};
pub use error::LanglocError;
pub use output::{LOCTable, TableRow};
pub use query::{Aggregation, FileRow, OrderBy, OrderDirection, Ordering, Report, ReportOptions};
pub use source::{FilterConfig, LanguageMap, UnknownPolicy};

/// Result type for langloclib operations
pub type Result<T> = std::result::Result<T, LanglocError>;
