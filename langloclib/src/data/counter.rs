//! High-level line counting API.
//!
//! This module provides the main entry points for counting physical lines
//! in a directory tree, with glob filtering, a skip-list and a pluggable
//! language table.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::error::LanglocError;
use crate::source::filter::{discover_files, FilterConfig};
use crate::source::language::LanguageMap;
use crate::Result;

use super::stats::{FileStats, FileWarning, LanguageBucket};

const CHUNK_SIZE: usize = 1024 * 1024;

/// Options for counting lines.
#[derive(Debug, Clone)]
pub struct CountOptions {
    /// File filter configuration (globs and skip-list)
    pub file_filter: FilterConfig,
    /// Extension and file name table
    pub languages: LanguageMap,
    /// Worker threads: 1 counts sequentially, 0 uses every core
    pub jobs: usize,
}

impl Default for CountOptions {
    fn default() -> Self {
        Self {
            file_filter: FilterConfig::new(),
            languages: LanguageMap::builtin(),
            jobs: 1,
        }
    }
}

impl CountOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set file filter.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.file_filter = filter;
        self
    }

    /// Set the language table.
    pub fn languages(mut self, languages: LanguageMap) -> Self {
        self.languages = languages;
        self
    }

    /// Set the number of worker threads.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }
}

/// Result of counting lines under a root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CountResult {
    /// Root that was counted
    pub root: PathBuf,
    /// Number of files counted
    pub file_count: usize,
    /// Lines across all buckets
    pub total: u64,
    /// Per-language buckets, keyed by language label
    pub buckets: BTreeMap<String, LanguageBucket>,
    /// Per-file statistics, sorted by path
    pub files: Vec<FileStats>,
    /// Files skipped because they could not be read, sorted by path
    pub warnings: Vec<FileWarning>,
}

impl CountResult {
    /// Create a new empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a measured file to its bucket and the totals.
    pub fn record(&mut self, file: FileStats) {
        self.buckets
            .entry(file.language.clone())
            .or_insert_with(|| LanguageBucket::new(file.language.clone()))
            .add_file(file.lines);
        self.total += file.lines;
        self.file_count += 1;
        self.files.push(file);
    }

    /// Record a skipped file.
    pub fn warn(&mut self, warning: FileWarning) {
        self.warnings.push(warning);
    }

    /// Combine two partial results. Files and warnings are re-sorted by the
    /// caller, so argument order does not matter.
    pub fn merge(mut self, other: CountResult) -> CountResult {
        for (language, bucket) in other.buckets {
            *self
                .buckets
                .entry(language.clone())
                .or_insert_with(|| LanguageBucket::new(language)) += bucket;
        }
        self.total += other.total;
        self.file_count += other.file_count;
        self.files.extend(other.files);
        self.warnings.extend(other.warnings);
        self
    }

    fn finish(mut self, root: &Path) -> Self {
        self.root = root.to_path_buf();
        self.files.sort_by(|a, b| a.path.cmp(&b.path));
        self.warnings.sort_by(|a, b| a.path.cmp(&b.path));
        self
    }
}

/// Count newline bytes from a reader.
///
/// Bytes are never decoded, so arbitrary binary or mis-encoded content
/// counts without error. A final line without a trailing newline is not
/// counted, matching `wc -l`.
pub fn count_reader_lines<R: Read>(reader: R) -> std::io::Result<u64> {
    let mut reader = BufReader::with_capacity(CHUNK_SIZE, reader);
    let mut total = 0u64;

    loop {
        let chunk = match reader.fill_buf() {
            Ok(chunk) => chunk,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if chunk.is_empty() {
            break;
        }
        total += bytecount::count(chunk, b'\n') as u64;
        let len = chunk.len();
        reader.consume(len);
    }

    Ok(total)
}

/// Count physical lines in a single file.
///
/// # Example
///
/// ```rust
/// use langloclib::count_file_lines;
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// let path = dir.path().join("a.py");
/// fs::write(&path, "import os\nprint(os.sep)\n").unwrap();
///
/// assert_eq!(count_file_lines(&path).unwrap(), 2);
/// ```
pub fn count_file_lines(path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();
    let read_err = |source| LanglocError::FileRead {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(read_err)?;
    count_reader_lines(file).map_err(read_err)
}

/// `path` relative to `root`. A file root is its own file name.
fn relative_to_root<'a>(root: &Path, path: &'a Path) -> &'a Path {
    match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel,
        _ => path.file_name().map(Path::new).unwrap_or(path),
    }
}

/// Classify and count one path into `acc`. Unreadable files become warnings.
fn count_path(acc: &mut CountResult, root: &Path, path: &Path, languages: &LanguageMap) {
    let Some(language) = languages.classify(relative_to_root(root, path)) else {
        trace!(path = %path.display(), "unclassified, not counted");
        return;
    };

    match count_file_lines(path) {
        Ok(lines) => {
            debug!(path = %path.display(), language, lines, "counted");
            acc.record(FileStats::new(path.to_path_buf(), language, lines));
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "skipping unreadable file");
            let message = match err {
                LanglocError::FileRead { source, .. } => source.to_string(),
                other => other.to_string(),
            };
            acc.warn(FileWarning::new(path.to_path_buf(), message));
        }
    }
}

fn count_paths(
    root: &Path,
    files: &[PathBuf],
    languages: &LanguageMap,
    jobs: usize,
) -> Result<CountResult> {
    if jobs == 1 {
        let mut acc = CountResult::new();
        for path in files {
            count_path(&mut acc, root, path, languages);
        }
        return Ok(acc);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .map_err(|e| LanglocError::ThreadPool(e.to_string()))?;

    Ok(pool.install(|| {
        files
            .par_iter()
            .fold(CountResult::new, |mut acc, path| {
                count_path(&mut acc, root, path, languages);
                acc
            })
            .reduce(CountResult::new, CountResult::merge)
    }))
}

/// Count lines under a directory (or a single file).
///
/// This is the main entry point. It:
/// 1. Checks the root exists and is readable
/// 2. Walks the tree, pruning skip-listed directories and applying globs
/// 3. Classifies each file and counts its newline bytes
/// 4. Aggregates per-language buckets and a grand total
///
/// # Example
///
/// ```rust
/// use langloclib::{count_directory, CountOptions};
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// fs::write(dir.path().join("a.py"), "a = 1\nb = 2\n").unwrap();
/// fs::write(dir.path().join("b.cpp"), "int main() {\n  return 0;\n}\n").unwrap();
///
/// let result = count_directory(dir.path(), CountOptions::new()).unwrap();
/// assert_eq!(result.total, 5);
/// assert_eq!(result.buckets["Python"].lines, 2);
/// assert_eq!(result.buckets["C++"].lines, 3);
/// ```
pub fn count_directory(path: impl AsRef<Path>, options: CountOptions) -> Result<CountResult> {
    let root = path.as_ref();
    let discovery = discover_files(root, &options.file_filter)?;
    debug!(
        root = %root.display(),
        files = discovery.files.len(),
        "discovered files"
    );

    let mut result = count_paths(root, &discovery.files, &options.languages, options.jobs)?;
    for warning in discovery.warnings {
        result.warn(warning);
    }

    Ok(result.finish(root))
}
