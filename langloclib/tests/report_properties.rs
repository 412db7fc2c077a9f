use std::path::PathBuf;

use langloclib::{CountResult, FileStats, LanguageMap, Report, ReportOptions};
use proptest::prelude::*;

const LANGUAGES: &[&str] = &["Python", "C++", "C", "Markdown", "Text", "YAML"];

fn build_result(files: &[(usize, u64)]) -> CountResult {
    let mut result = CountResult::new();
    result.root = PathBuf::from("/repo");
    for (i, (lang, lines)) in files.iter().enumerate() {
        result.record(FileStats::new(
            PathBuf::from(format!("/repo/f{i}")),
            LANGUAGES[*lang],
            *lines,
        ));
    }
    result
}

proptest! {
    #[test]
    fn total_is_sum_of_buckets(
        files in prop::collection::vec((0..LANGUAGES.len(), 0u64..100_000), 0..64)
    ) {
        let result = build_result(&files);
        let report = Report::from_result(&result, &ReportOptions::new());

        prop_assert_eq!(report.total, report.buckets.iter().map(|b| b.lines).sum::<u64>());
        prop_assert_eq!(report.total, files.iter().map(|(_, l)| *l).sum::<u64>());
        prop_assert_eq!(report.file_count, files.len());
    }

    #[test]
    fn code_only_total_is_sum_of_kept_buckets(
        files in prop::collection::vec((0..LANGUAGES.len(), 0u64..100_000), 0..64)
    ) {
        let map = LanguageMap::builtin();
        let result = build_result(&files);
        let report = Report::from_result(&result, &ReportOptions::new().code_only(&map));

        prop_assert!(report.buckets.iter().all(|b| map.is_code(&b.language)));
        prop_assert_eq!(report.total, report.buckets.iter().map(|b| b.lines).sum::<u64>());
    }

    #[test]
    fn buckets_sorted_by_lines_then_name(
        files in prop::collection::vec((0..LANGUAGES.len(), 0u64..50), 0..64)
    ) {
        let report = Report::from_result(&build_result(&files), &ReportOptions::new());

        for pair in report.buckets.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.lines > b.lines || (a.lines == b.lines && a.language < b.language));
        }
    }
}
