//! Report: processed data ready for table rendering.
//!
//! A Report sits between the raw [`CountResult`] and the final table output.
//! It represents data that has been:
//! - Restricted to the requested languages
//! - Sorted according to the ordering preference
//! - Totalled over exactly the rows it keeps
//!
//! The data pipeline is:
//! 1. Raw Data (CountResult)
//! 2. Report (filtered, sorted, totalled)
//! 3. LOCTable (formatted strings for display)

use std::cmp;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::counter::CountResult;
use crate::data::stats::{FileWarning, LanguageBucket};

use super::options::{Aggregation, OrderBy, OrderDirection, Ordering, ReportOptions};

/// One per-file row of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRow {
    /// Path relative to the counted root
    pub label: String,
    /// Classified language
    pub language: String,
    /// Physical line count
    pub lines: u64,
}

/// Final, read-only aggregation of a count.
///
/// `total` always equals the sum of `buckets[..].lines`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Aggregation level used
    pub aggregation: Aggregation,
    /// Language rows, sorted
    pub buckets: Vec<LanguageBucket>,
    /// File rows (only for [`Aggregation::ByFile`]), sorted
    pub files: Vec<FileRow>,
    /// Sum of all bucket line counts
    pub total: u64,
    /// Number of files behind the buckets
    pub file_count: usize,
    /// Files skipped during the run
    pub warnings: Vec<FileWarning>,
}

impl Report {
    /// Create a Report from a CountResult.
    ///
    /// # Example
    ///
    /// ```rust
    /// use langloclib::{count_directory, CountOptions, Report, ReportOptions};
    /// use std::fs;
    /// use tempfile::tempdir;
    ///
    /// let dir = tempdir().unwrap();
    /// fs::write(dir.path().join("a.py"), "1\n2\n").unwrap();
    /// fs::write(dir.path().join("b.cpp"), "1\n2\n3\n4\n5\n").unwrap();
    ///
    /// let result = count_directory(dir.path(), CountOptions::new()).unwrap();
    /// let report = Report::from_result(&result, &ReportOptions::new());
    ///
    /// let order: Vec<&str> = report.buckets.iter().map(|b| b.language.as_str()).collect();
    /// assert_eq!(order, ["C++", "Python"]);
    /// assert_eq!(report.total, 7);
    /// ```
    pub fn from_result(result: &CountResult, options: &ReportOptions) -> Self {
        let mut buckets: Vec<LanguageBucket> = result
            .buckets
            .values()
            .filter(|b| options.includes(&b.language))
            .cloned()
            .collect();
        buckets.sort_by(|a, b| {
            compare_rows(
                &options.ordering,
                (a.language.as_str(), a.lines),
                (b.language.as_str(), b.lines),
            )
        });

        let files = match options.aggregation {
            Aggregation::ByLanguage => Vec::new(),
            Aggregation::ByFile => {
                let mut files: Vec<FileRow> = result
                    .files
                    .iter()
                    .filter(|f| options.includes(&f.language))
                    .map(|f| FileRow {
                        label: relative_path_label(&f.path, &result.root),
                        language: f.language.clone(),
                        lines: f.lines,
                    })
                    .collect();
                files.sort_by(|a, b| {
                    compare_rows(
                        &options.ordering,
                        (a.label.as_str(), a.lines),
                        (b.label.as_str(), b.lines),
                    )
                });
                files
            }
        };

        Report {
            aggregation: options.aggregation,
            total: buckets.iter().map(|b| b.lines).sum(),
            file_count: buckets.iter().map(|b| b.files).sum(),
            buckets,
            files,
            warnings: result.warnings.clone(),
        }
    }

    /// True when no file was counted into any bucket.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Order two rows by the requested key, breaking ties by label ascending.
fn compare_rows(ordering: &Ordering, a: (&str, u64), b: (&str, u64)) -> cmp::Ordering {
    let primary = match ordering.by {
        OrderBy::Lines => a.1.cmp(&b.1),
        OrderBy::Label => a.0.cmp(b.0),
    };
    let primary = match ordering.direction {
        OrderDirection::Ascending => primary,
        OrderDirection::Descending => primary.reverse(),
    };
    primary.then_with(|| a.0.cmp(b.0))
}

/// Compute a relative path label for a file.
/// Falls back to the file name when the root is the file itself, and to the
/// full path when the file is not under the root.
fn relative_path_label(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_string_lossy().to_string(),
        Ok(_) => path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string()),
        Err(_) => path.to_string_lossy().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::stats::FileStats;
    use crate::source::language::LanguageMap;
    use std::path::PathBuf;

    fn sample_result() -> CountResult {
        let mut result = CountResult::new();
        result.root = PathBuf::from("/repo");
        for (path, lang, lines) in [
            ("/repo/a.py", "Python", 2),
            ("/repo/b.cpp", "C++", 5),
            ("/repo/docs/x.md", "Markdown", 5),
            ("/repo/pkg/c.py", "Python", 1),
            ("/repo/z.pyx", "Cython", 9),
        ] {
            result.record(FileStats::new(PathBuf::from(path), lang, lines));
        }
        result
    }

    fn languages(report: &Report) -> Vec<&str> {
        report.buckets.iter().map(|b| b.language.as_str()).collect()
    }

    #[test]
    fn test_sorted_descending_with_name_ties() {
        let report = Report::from_result(&sample_result(), &ReportOptions::new());

        // C++ and Markdown tie on 5; the name breaks it ascending
        assert_eq!(languages(&report), ["Cython", "C++", "Markdown", "Python"]);
        assert_eq!(report.total, 22);
        assert_eq!(report.file_count, 5);
        assert!(report.files.is_empty());
    }

    #[test]
    fn test_sum_invariant() {
        let report = Report::from_result(&sample_result(), &ReportOptions::new());
        assert_eq!(
            report.total,
            report.buckets.iter().map(|b| b.lines).sum::<u64>()
        );
    }

    #[test]
    fn test_order_by_label() {
        let report = Report::from_result(
            &sample_result(),
            &ReportOptions::new().ordering(Ordering::by_label()),
        );
        assert_eq!(languages(&report), ["C++", "Cython", "Markdown", "Python"]);
    }

    #[test]
    fn test_ascending_lines_keeps_name_ties_ascending() {
        let report = Report::from_result(
            &sample_result(),
            &ReportOptions::new().ordering(Ordering::by_lines().ascending()),
        );
        assert_eq!(languages(&report), ["Python", "C++", "Markdown", "Cython"]);
    }

    #[test]
    fn test_code_only_recomputes_total() {
        let report = Report::from_result(
            &sample_result(),
            &ReportOptions::new().code_only(&LanguageMap::builtin()),
        );

        assert_eq!(languages(&report), ["Cython", "C++", "Python"]);
        assert_eq!(report.total, 17);
        assert_eq!(report.file_count, 4);
    }

    #[test]
    fn test_by_file_rows() {
        let report = Report::from_result(
            &sample_result(),
            &ReportOptions::new().aggregation(Aggregation::ByFile),
        );

        let labels: Vec<&str> = report.files.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, ["z.pyx", "b.cpp", "docs/x.md", "a.py", "pkg/c.py"]);
        assert_eq!(report.files[0].language, "Cython");
        assert_eq!(
            report.total,
            report.files.iter().map(|f| f.lines).sum::<u64>()
        );
    }

    #[test]
    fn test_empty_result() {
        let report = Report::from_result(&CountResult::new(), &ReportOptions::new());
        assert!(report.is_empty());
        assert_eq!(report.total, 0);
        assert_eq!(report.file_count, 0);
    }

    #[test]
    fn test_relative_path_label() {
        let root = Path::new("/repo");
        assert_eq!(relative_path_label(Path::new("/repo/src/a.py"), root), "src/a.py");
        assert_eq!(relative_path_label(Path::new("/elsewhere/b.py"), root), "/elsewhere/b.py");
        assert_eq!(
            relative_path_label(Path::new("/repo/one.py"), Path::new("/repo/one.py")),
            "one.py"
        );
    }
}
