//! Error types for langloclib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during line counting
#[derive(Error, Debug)]
pub enum LanglocError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Root path does not exist or cannot be accessed
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Configuration file could not be read or parsed
    #[error("invalid config file '{path}': {message}")]
    Config { path: PathBuf, message: String },

    /// Worker pool could not be started
    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
