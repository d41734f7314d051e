//! Errors raised at load and level-transition boundaries.
//!
//! The per-frame path never returns these; it logs and degrades instead.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Animation directory does not exist or is not a directory.
    #[error("animation directory does not exist: {0}")]
    AnimationDirMissing(PathBuf),

    /// Directory exists but holds no usable frame images.
    #[error("no frame files found in directory: {0}")]
    NoFrames(PathBuf),

    /// Filesystem error while listing a directory.
    #[error("i/o error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed config or level JSON.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for load-time engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
