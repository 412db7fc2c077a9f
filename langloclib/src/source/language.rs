//! Language classification by file name and extension.
//!
//! A [`LanguageMap`] is an immutable table handed to the counter. Lookups go
//! exact file name first, then lower-cased extension, then the
//! [`UnknownPolicy`] for anything left over.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Label used for files counted under [`UnknownPolicy::Text`].
pub const TEXT_LANGUAGE: &str = "Text";

const DEFAULT_EXTENSIONS: &[(&str, &str)] = &[
    ("py", "Python"),
    ("pyx", "Cython"),
    ("pxd", "Cython"),
    ("pxi", "Cython"),
    ("c", "C"),
    ("h", "C"),
    ("cpp", "C++"),
    ("cc", "C++"),
    ("cxx", "C++"),
    ("hpp", "C++"),
    ("hh", "C++"),
    ("hxx", "C++"),
    ("f", "Fortran"),
    ("f90", "Fortran"),
    ("f95", "Fortran"),
    ("f03", "Fortran"),
    ("sh", "Shell"),
    ("bash", "Shell"),
    ("ps1", "PowerShell"),
    ("rst", "reStructuredText"),
    ("md", "Markdown"),
    ("toml", "TOML"),
    ("yaml", "YAML"),
    ("yml", "YAML"),
    ("json", "JSON"),
    ("ini", "Config"),
    ("cfg", "Config"),
    ("conf", "Config"),
    ("cmake", "CMake"),
    ("mk", "Makefile"),
    ("ipynb", "Jupyter Notebook"),
    ("txt", TEXT_LANGUAGE),
];

const DEFAULT_FILENAMES: &[(&str, &str)] = &[("CMakeLists.txt", "CMake"), ("Makefile", "Makefile")];

const DEFAULT_CODE_LANGUAGES: &[&str] = &["Python", "C++", "Cython", "C", "Fortran"];

/// What to do with files no table entry recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownPolicy {
    /// Leave unrecognised files out of the count
    #[default]
    Exclude,
    /// Count unrecognised files in the "Text" bucket
    Text,
}

impl FromStr for UnknownPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exclude" | "skip" => Ok(UnknownPolicy::Exclude),
            "text" => Ok(UnknownPolicy::Text),
            _ => Err(format!("Unknown policy: {}", s)),
        }
    }
}

/// Extension and file name table mapping paths to language labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageMap {
    /// Lower-cased extension (no leading dot) to language
    extensions: BTreeMap<String, String>,
    /// Exact file name to language
    filenames: BTreeMap<String, String>,
    /// Languages kept by code-only reports
    code_languages: BTreeSet<String>,
    /// Fallback for unrecognised files
    unknown: UnknownPolicy,
}

impl Default for LanguageMap {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim_start_matches('.').to_ascii_lowercase()
}

impl LanguageMap {
    /// Create an empty map that recognises nothing.
    pub fn empty() -> Self {
        Self {
            extensions: BTreeMap::new(),
            filenames: BTreeMap::new(),
            code_languages: BTreeSet::new(),
            unknown: UnknownPolicy::Exclude,
        }
    }

    /// The built-in table.
    pub fn builtin() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS
                .iter()
                .map(|(ext, lang)| (ext.to_string(), lang.to_string()))
                .collect(),
            filenames: DEFAULT_FILENAMES
                .iter()
                .map(|(name, lang)| (name.to_string(), lang.to_string()))
                .collect(),
            code_languages: DEFAULT_CODE_LANGUAGES
                .iter()
                .map(|lang| lang.to_string())
                .collect(),
            unknown: UnknownPolicy::Exclude,
        }
    }

    /// Map an extension to a language. A leading dot is optional and case is ignored.
    pub fn with_extension(mut self, ext: &str, language: impl Into<String>) -> Self {
        self.extensions
            .insert(normalize_extension(ext), language.into());
        self
    }

    /// Map an exact file name to a language.
    pub fn with_filename(mut self, name: impl Into<String>, language: impl Into<String>) -> Self {
        self.filenames.insert(name.into(), language.into());
        self
    }

    /// Replace the set of languages considered code.
    pub fn with_code_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.code_languages = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Set the policy for unrecognised files.
    pub fn unknown_policy(mut self, policy: UnknownPolicy) -> Self {
        self.unknown = policy;
        self
    }

    /// Current policy for unrecognised files.
    pub fn policy(&self) -> UnknownPolicy {
        self.unknown
    }

    /// Whether `language` counts as code for code-only reports.
    pub fn is_code(&self, language: &str) -> bool {
        self.code_languages.contains(language)
    }

    /// Languages considered code.
    pub fn code_languages(&self) -> impl Iterator<Item = &str> {
        self.code_languages.iter().map(String::as_str)
    }

    /// Classify a path relative to the counted root, returning `None` when
    /// the file should not be counted.
    ///
    /// File-name entries only match at the root (`CMakeLists.txt`, not
    /// `src/CMakeLists.txt`). Deeper files fall through to the extension table.
    pub fn classify(&self, path: &Path) -> Option<&str> {
        let at_root = path.parent().is_none_or(|p| p.as_os_str().is_empty());
        if at_root {
            if let Some(lang) = path
                .file_name()
                .and_then(|name| self.filenames.get(name.to_string_lossy().as_ref()))
            {
                return Some(lang);
            }
        }

        let by_ext = path
            .extension()
            .and_then(|ext| self.extensions.get(&normalize_extension(&ext.to_string_lossy())));

        match (by_ext, self.unknown) {
            (Some(lang), _) => Some(lang),
            (None, UnknownPolicy::Text) => Some(TEXT_LANGUAGE),
            (None, UnknownPolicy::Exclude) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_extensions() {
        let map = LanguageMap::builtin();
        assert_eq!(map.classify(Path::new("src/a.py")), Some("Python"));
        assert_eq!(map.classify(Path::new("x.cpp")), Some("C++"));
        assert_eq!(map.classify(Path::new("x.hpp")), Some("C++"));
        assert_eq!(map.classify(Path::new("x.c")), Some("C"));
        assert_eq!(map.classify(Path::new("x.h")), Some("C"));
        assert_eq!(map.classify(Path::new("x.pyx")), Some("Cython"));
        assert_eq!(map.classify(Path::new("nb.ipynb")), Some("Jupyter Notebook"));
        assert_eq!(map.classify(Path::new("docs/index.rst")), Some("reStructuredText"));
        assert_eq!(map.classify(Path::new("README.md")), Some("Markdown"));
    }

    #[test]
    fn test_extension_case_insensitive() {
        let map = LanguageMap::builtin();
        assert_eq!(map.classify(Path::new("LEGACY.F90")), Some("Fortran"));
        assert_eq!(map.classify(Path::new("Setup.PY")), Some("Python"));
    }

    #[test]
    fn test_filename_wins_over_extension() {
        let map = LanguageMap::builtin();
        assert_eq!(map.classify(Path::new("CMakeLists.txt")), Some("CMake"));
        assert_eq!(map.classify(Path::new("Makefile")), Some("Makefile"));
        assert_eq!(map.classify(Path::new("notes.txt")), Some("Text"));
    }

    #[test]
    fn test_filename_only_matches_at_root() {
        let map = LanguageMap::builtin();
        assert_eq!(map.classify(Path::new("sub/CMakeLists.txt")), Some("Text"));
        assert_eq!(map.classify(Path::new("src/lib/Makefile")), None);

        let text = LanguageMap::builtin().unknown_policy(UnknownPolicy::Text);
        assert_eq!(text.classify(Path::new("src/lib/Makefile")), Some(TEXT_LANGUAGE));
    }

    #[test]
    fn test_unknown_policy() {
        let exclude = LanguageMap::builtin();
        assert_eq!(exclude.classify(Path::new("logo.png")), None);
        assert_eq!(exclude.classify(Path::new("LICENSE")), None);

        let text = LanguageMap::builtin().unknown_policy(UnknownPolicy::Text);
        assert_eq!(text.classify(Path::new("logo.png")), Some(TEXT_LANGUAGE));
        assert_eq!(text.classify(Path::new("LICENSE")), Some(TEXT_LANGUAGE));
        assert_eq!(text.classify(Path::new("a.py")), Some("Python"));
    }

    #[test]
    fn test_overrides() {
        let map = LanguageMap::builtin()
            .with_extension(".PYI", "Python")
            .with_extension("h", "C++")
            .with_filename("SConstruct", "Python");
        assert_eq!(map.classify(Path::new("stubs.pyi")), Some("Python"));
        assert_eq!(map.classify(Path::new("x.h")), Some("C++"));
        assert_eq!(map.classify(Path::new("SConstruct")), Some("Python"));
    }

    #[test]
    fn test_code_languages() {
        let map = LanguageMap::builtin();
        assert!(map.is_code("Python"));
        assert!(map.is_code("Fortran"));
        assert!(!map.is_code("Markdown"));

        let map = map.with_code_languages(["Markdown"]);
        assert!(map.is_code("Markdown"));
        assert!(!map.is_code("Python"));
    }

    #[test]
    fn test_unknown_policy_from_str() {
        assert_eq!(UnknownPolicy::from_str("text").unwrap(), UnknownPolicy::Text);
        assert_eq!(UnknownPolicy::from_str("Exclude").unwrap(), UnknownPolicy::Exclude);
        assert!(UnknownPolicy::from_str("maybe").is_err());
    }
}
