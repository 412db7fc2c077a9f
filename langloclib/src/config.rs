//! JSON configuration overrides for the skip-list and language table.
//!
//! ```json
//! {
//!   "skip_dirs": [".git", "build"],
//!   "extensions": { ".pyi": "Python" },
//!   "filenames": { "SConstruct": "Python" },
//!   "unknown": "text",
//!   "code_languages": ["Python", "C"]
//! }
//! ```
//!
//! `skip_dirs` replaces the default skip-list. `extensions` and `filenames`
//! are merged over the built-in table.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::counter::CountOptions;
use crate::error::LanglocError;
use crate::source::filter::FilterConfig;
use crate::source::language::{LanguageMap, UnknownPolicy};
use crate::Result;

/// Overrides read from a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Replacement skip-list
    #[serde(default)]
    pub skip_dirs: Option<Vec<String>>,
    /// Extra or replacement extension mappings
    #[serde(default)]
    pub extensions: BTreeMap<String, String>,
    /// Extra or replacement file name mappings
    #[serde(default)]
    pub filenames: BTreeMap<String, String>,
    /// Policy for unrecognised files
    #[serde(default)]
    pub unknown: Option<UnknownPolicy>,
    /// Replacement set of code languages
    #[serde(default)]
    pub code_languages: Option<Vec<String>>,
}

impl ConfigFile {
    /// Parse configuration from a JSON string.
    pub fn from_json(source: &str) -> serde_json::Result<Self> {
        serde_json::from_str(source)
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_err = |message: String| LanglocError::Config {
            path: path.to_path_buf(),
            message,
        };
        let source = std::fs::read_to_string(path).map_err(|e| config_err(e.to_string()))?;
        Self::from_json(&source).map_err(|e| config_err(e.to_string()))
    }

    /// Apply the language overrides on top of `base`.
    pub fn languages(&self, base: LanguageMap) -> LanguageMap {
        let mut map = base;
        for (ext, language) in &self.extensions {
            map = map.with_extension(ext, language.clone());
        }
        for (name, language) in &self.filenames {
            map = map.with_filename(name.clone(), language.clone());
        }
        if let Some(policy) = self.unknown {
            map = map.unknown_policy(policy);
        }
        if let Some(code) = &self.code_languages {
            map = map.with_code_languages(code.iter().cloned());
        }
        map
    }

    /// Apply the skip-list override on top of `base`.
    pub fn filter(&self, base: FilterConfig) -> FilterConfig {
        match &self.skip_dirs {
            Some(dirs) => base.skip_dirs(dirs.iter().cloned()),
            None => base,
        }
    }

    /// Apply every override to a set of count options.
    pub fn apply(&self, options: CountOptions) -> CountOptions {
        let filter = self.filter(options.file_filter.clone());
        let languages = self.languages(options.languages.clone());
        options.filter(filter).languages(languages)
    }
}
