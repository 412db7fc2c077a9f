//! Core data structures for line statistics.
//!
//! Counting is physical lines only: the number of newline bytes in a file,
//! the same figure `wc -l` prints. Each file lands in at most one
//! [`LanguageBucket`].

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};
use std::path::PathBuf;

/// Accumulated line count for one language.
///
/// Buckets are created the first time a file classifies into a language
/// and only ever grow during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageBucket {
    /// Language label (e.g. "Python", "C++")
    pub language: String,
    /// Physical lines across all files in this language
    pub lines: u64,
    /// Number of files counted into this bucket
    pub files: usize,
}

impl LanguageBucket {
    /// Create an empty bucket.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            lines: 0,
            files: 0,
        }
    }

    /// Count one file into this bucket.
    pub fn add_file(&mut self, lines: u64) {
        self.lines += lines;
        self.files += 1;
    }
}

impl Add for LanguageBucket {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl AddAssign for LanguageBucket {
    fn add_assign(&mut self, other: Self) {
        debug_assert_eq!(self.language, other.language);
        self.lines += other.lines;
        self.files += other.files;
    }
}

/// Statistics for a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStats {
    /// Path to the file.
    pub path: PathBuf,
    /// Language the file was classified as.
    pub language: String,
    /// Physical line count.
    pub lines: u64,
}

impl FileStats {
    /// Create new file stats.
    pub fn new(path: PathBuf, language: impl Into<String>, lines: u64) -> Self {
        Self {
            path,
            language: language.into(),
            lines,
        }
    }
}

/// A file that was skipped because it could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileWarning {
    /// Path of the skipped file or entry.
    pub path: PathBuf,
    /// Why it was skipped.
    pub message: String,
}

impl FileWarning {
    /// Create a new warning.
    pub fn new(path: PathBuf, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FileWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "skipped '{}': {}", self.path.display(), self.message)
    }
}
