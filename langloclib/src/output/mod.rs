//! Output formatting: present data as tables.
//!
//! This module handles the fourth and final stage of the pipeline -
//! formatting a report for display. It provides:
//!
//! - **LOCTable**: Table-ready data structure with headers, rows, and footer
//! - **TableRow**: Individual row with label and formatted values
//!
//! ## Example
//!
//! ```rust,ignore
//! use langloclib::output::LOCTable;
//!
//! let table = LOCTable::from_report(&report);
//! // table.headers: ["Language", "Lines"]
//! // table.rows: [TableRow { label: "Python", values: ["1200"] }]
//! // table.footer: TableRow { label: "TOTAL", values: ["1200"] }
//! ```

pub mod table;

pub use table::{LOCTable, TableRow, TOTAL_LABEL};
