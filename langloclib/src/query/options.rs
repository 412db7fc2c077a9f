//! Options controlling how a count becomes a report.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::source::language::LanguageMap;

/// Aggregation level for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Aggregation {
    /// One row per language
    #[default]
    ByLanguage,
    /// Language rows plus one row per file
    ByFile,
}

/// Field to order results by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderBy {
    /// Order by line count
    #[default]
    Lines,
    /// Order by language name (or file path for file rows)
    Label,
}

impl FromStr for OrderBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lines" | "count" => Ok(OrderBy::Lines),
            "label" | "language" | "name" | "path" => Ok(OrderBy::Label),
            _ => Err(format!("Unknown order field: {}", s)),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderDirection {
    /// Ascending (A-Z, smallest first)
    Ascending,
    /// Descending (Z-A, largest first)
    #[default]
    Descending,
}

/// Ordering configuration for results.
///
/// Ties on the primary key always fall back to the label, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ordering {
    /// Field to order by
    pub by: OrderBy,
    /// Sort direction
    pub direction: OrderDirection,
}

impl Default for Ordering {
    fn default() -> Self {
        Self::by_lines()
    }
}

impl Ordering {
    /// Order by line count, largest first (default)
    pub fn by_lines() -> Self {
        Self {
            by: OrderBy::Lines,
            direction: OrderDirection::Descending,
        }
    }

    /// Order by label, A-Z
    pub fn by_label() -> Self {
        Self {
            by: OrderBy::Label,
            direction: OrderDirection::Ascending,
        }
    }

    /// Set sort direction to ascending
    pub fn ascending(mut self) -> Self {
        self.direction = OrderDirection::Ascending;
        self
    }

    /// Set sort direction to descending
    pub fn descending(mut self) -> Self {
        self.direction = OrderDirection::Descending;
        self
    }
}

/// Everything that shapes a [`Report`](super::report::Report).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Aggregation level
    pub aggregation: Aggregation,
    /// Row ordering
    pub ordering: Ordering,
    /// When set, only these languages are reported
    pub languages: Option<BTreeSet<String>>,
}

impl ReportOptions {
    /// Create default options: by language, largest first, all languages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set aggregation level.
    pub fn aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    /// Set ordering.
    pub fn ordering(mut self, ordering: Ordering) -> Self {
        self.ordering = ordering;
        self
    }

    /// Restrict the report to the given languages.
    pub fn only_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = Some(languages.into_iter().map(Into::into).collect());
        self
    }

    /// Restrict the report to the code languages of `map`.
    pub fn code_only(self, map: &LanguageMap) -> Self {
        let languages: Vec<String> = map.code_languages().map(str::to_string).collect();
        self.only_languages(languages)
    }

    /// Whether a language passes the language restriction.
    pub fn includes(&self, language: &str) -> bool {
        self.languages
            .as_ref()
            .is_none_or(|set| set.contains(language))
    }
}
