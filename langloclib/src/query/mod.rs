//! Query processing: filter, sort and total the counted data.
//!
//! This module handles the third stage of the pipeline - transforming raw
//! counting results into a report. It provides:
//!
//! - **Options**: Configuration for aggregation, ordering and language scope
//! - **Report**: Processed data ready for presentation
//!
//! ## Example
//!
//! ```rust,ignore
//! use langloclib::query::{Aggregation, Ordering, Report, ReportOptions};
//!
//! let report = Report::from_result(
//!     &result,
//!     &ReportOptions::new()
//!         .aggregation(Aggregation::ByFile)
//!         .ordering(Ordering::by_lines()),
//! );
//! ```

pub mod options;
pub mod report;

pub use options::{Aggregation, OrderBy, OrderDirection, Ordering, ReportOptions};
pub use report::{FileRow, Report};
