//! Data collection: count files and aggregate statistics.
//!
//! This module handles the second stage of the pipeline - measuring the
//! discovered files and collecting per-language statistics. It provides:
//!
//! - **Statistics**: Core data structures (`LanguageBucket`, `FileStats`, `FileWarning`)
//! - **Counting**: High-level API (`count_directory`, `count_file_lines`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use langloclib::data::{count_directory, CountOptions};
//!
//! let result = count_directory(".", CountOptions::new())?;
//! println!("Total lines: {}", result.total);
//! ```

pub mod counter;
pub mod stats;

pub use counter::{
    count_directory, count_file_lines, count_reader_lines, CountOptions, CountResult,
};
pub use stats::{FileStats, FileWarning, LanguageBucket};
