//! File filtering and discovery with glob pattern support.
//!
//! Walks a directory tree with the `ignore` crate's walker, honouring
//! `.gitignore`/`.ignore` rules and skipping hidden entries the way
//! `rg --files` does. Skip-listed directories are pruned, symlinked
//! directories are not descended into, and include/exclude glob patterns are
//! applied last. Classification happens later, in the counter, against a
//! [`LanguageMap`](super::language::LanguageMap).

use std::path::{Path, PathBuf};

use glob::Pattern;
use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::data::stats::FileWarning;
use crate::error::LanglocError;
use crate::Result;

/// Directory names pruned by default: version-control metadata.
pub const DEFAULT_SKIP_DIRS: &[&str] = &[".git", ".hg", ".svn", ".bzr", "_darcs", "CVS"];

/// Configuration for file filtering.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Glob patterns to include (if empty, include all files)
    pub include: Vec<Pattern>,
    /// Glob patterns to exclude
    pub exclude: Vec<Pattern>,
    /// Directory names that are never descended into
    pub skip_dirs: Vec<String>,
    /// Honour ignore files and skip hidden entries
    pub ignore_files: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|d| d.to_string()).collect(),
            ignore_files: true,
        }
    }
}

impl FilterConfig {
    /// Create a new filter config with the default skip-list and no patterns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: &str) -> Result<Self> {
        let pat = Pattern::new(pattern).map_err(|e| LanglocError::InvalidGlob {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        self.include.push(pat);
        Ok(self)
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        let pat = Pattern::new(pattern).map_err(|e| LanglocError::InvalidGlob {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        self.exclude.push(pat);
        Ok(self)
    }

    /// Add multiple include patterns.
    pub fn include_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.include(pattern)?;
        }
        Ok(self)
    }

    /// Add multiple exclude patterns.
    pub fn exclude_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.exclude(pattern)?;
        }
        Ok(self)
    }

    /// Replace the skip-list.
    pub fn skip_dirs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_dirs = names.into_iter().map(Into::into).collect();
        self
    }

    /// Add one directory name to the skip-list.
    pub fn skip_dir(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.skip_dirs.contains(&name) {
            self.skip_dirs.push(name);
        }
        self
    }

    /// Toggle `.gitignore`/`.ignore` handling and hidden-entry skipping.
    pub fn ignore_files(mut self, yes: bool) -> Self {
        self.ignore_files = yes;
        self
    }

    /// Check if a directory with this name is pruned.
    pub fn is_skipped_dir(&self, name: &str) -> bool {
        self.skip_dirs.iter().any(|d| d == name)
    }

    /// Check if a path matches the glob criteria.
    ///
    /// A path matches if it matches at least one include pattern (or include
    /// is empty) and doesn't match any exclude pattern.
    pub fn matches(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        if self.exclude.iter().any(|p| p.matches(&path_str)) {
            return false;
        }

        self.include.is_empty() || self.include.iter().any(|p| p.matches(&path_str))
    }
}

/// Files found under a root, plus the entries the walk could not read.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// Matching files, sorted
    pub files: Vec<PathBuf>,
    /// Entries that failed during traversal
    pub warnings: Vec<FileWarning>,
}

/// Fail with [`LanglocError::PathNotFound`] unless `root` exists and can be read.
pub fn check_root(root: &Path) -> Result<()> {
    let meta =
        std::fs::metadata(root).map_err(|_| LanglocError::PathNotFound(root.to_path_buf()))?;
    if meta.is_dir() {
        std::fs::read_dir(root).map_err(|_| LanglocError::PathNotFound(root.to_path_buf()))?;
    }
    Ok(())
}

fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        _ => None,
    }
}

/// Discover files under `root` that pass the filter.
///
/// A root that is itself a file is returned alone (if it matches).
/// Symlinks to files are kept, symlinked directories are not walked and
/// dangling links become warnings. Traversal errors are recorded as warnings
/// rather than aborting.
pub fn discover_files(root: impl AsRef<Path>, filter: &FilterConfig) -> Result<Discovery> {
    let root = root.as_ref();
    check_root(root)?;

    let mut discovery = Discovery::default();

    if root.is_file() {
        if filter.matches(root) {
            discovery.files.push(root.to_path_buf());
        }
        return Ok(discovery);
    }

    let skip_dirs = filter.skip_dirs.clone();
    let walker = WalkBuilder::new(root)
        .standard_filters(filter.ignore_files)
        .require_git(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |e| {
            let skipped = e.depth() > 0
                && e.file_type().is_some_and(|ft| ft.is_dir())
                && skip_dirs.iter().any(|d| e.file_name() == d.as_str());
            if skipped {
                debug!(path = %e.path().display(), "skipping directory");
                return false;
            }
            true
        })
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                let path = error_path(&err)
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                warn!(path = %path.display(), error = %err, "skipping unreadable entry");
                discovery.warnings.push(FileWarning::new(path, err.to_string()));
                continue;
            }
        };

        let Some(file_type) = entry.file_type() else {
            continue;
        };
        let path = entry.path();
        let is_file = if file_type.is_symlink() {
            match std::fs::metadata(path) {
                Ok(meta) => meta.is_file(),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping broken symlink");
                    discovery
                        .warnings
                        .push(FileWarning::new(path.to_path_buf(), err.to_string()));
                    continue;
                }
            }
        } else {
            file_type.is_file()
        };

        if is_file && filter.matches(path) {
            discovery.files.push(path.to_path_buf());
        }
    }

    discovery.files.sort();
    discovery.warnings.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(discovery)
}
