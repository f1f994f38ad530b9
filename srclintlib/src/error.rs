//! Error types for srclintlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering and reading source files.
///
/// The scanner core itself never fails: every entry point that takes source
/// text is a total function returning data. Errors exist only at the I/O edge.
#[derive(Error, Debug)]
pub enum SrclintError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
