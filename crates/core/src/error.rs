//! Error types for file-share
//!
//! Every expected failure of an upload run is one of these variants. They
//! propagate to the command layer, which reports the message once and exits
//! with a non-zero status.

use thiserror::Error;

/// Result type alias for file-share operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for file-share operations
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read
    #[error("{0}")]
    Config(String),

    /// Required configuration keys are missing or empty
    #[error("Missing config: {}", .0.join(", "))]
    MissingConfig(Vec<&'static str>),

    /// A URL could not be downloaded
    #[error("Failed to download {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// Local inputs could not be expanded into files
    #[error(transparent)]
    Expand(#[from] ExpandError),

    /// The archive could not be written
    #[error("Failed to create zip: {0}")]
    Build(String),

    /// The object store rejected an upload
    #[error("Failed to upload {file}: {reason}")]
    Upload { file: String, reason: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// General error
    #[error("{0}")]
    General(String),
}

/// Failures while turning local patterns into files
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExpandError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("{0} is a directory, use --recursive to upload recursively")]
    IsDirectory(String),

    #[error("No files matched: {0}")]
    NoMatch(String),

    #[error("Invalid pattern {pattern}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Failed to walk directory {path}: {reason}")]
    Walk { path: String, reason: String },

    #[error("No files to upload")]
    NoFiles,
}
