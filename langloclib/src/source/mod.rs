//! Source discovery: find and classify files to count.
//!
//! This module handles the first stage of the pipeline. It provides:
//!
//! - **File discovery**: walk a tree, prune skip-listed directories, apply globs
//! - **Classification**: map each file to a language label
//!
//! ## Example
//!
//! ```rust,ignore
//! use langloclib::source::{FilterConfig, LanguageMap, UnknownPolicy};
//!
//! let filter = FilterConfig::new().exclude("**/build/**")?;
//! let languages = LanguageMap::builtin().unknown_policy(UnknownPolicy::Text);
//! ```

pub mod filter;
pub mod language;

pub use filter::{check_root, discover_files, Discovery, FilterConfig, DEFAULT_SKIP_DIRS};
pub use language::{LanguageMap, UnknownPolicy, TEXT_LANGUAGE};
