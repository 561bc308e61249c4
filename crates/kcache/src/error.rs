//! Error types for cache directory operations.

use std::path::PathBuf;

/// Errors that can occur while inspecting or pruning a cache directory.
///
/// Names that fail to decode are never errors; they are reported as invalid
/// entries. Only filesystem failures surface here.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// An I/O error occurred while reading or modifying cache files.
    #[error("cache I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
