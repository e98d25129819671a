//! Error types for e2e-report

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for report loading and generation
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Filesystem error, with the path that was being touched
    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The run report could not be decoded
    #[error("invalid run report: {0}")]
    Decode(#[from] serde_json::Error),

    /// XML encoding failed
    #[error("xml encoding error: {0}")]
    Xml(#[from] quick_xml::SeError),
}

impl Error {
    /// Wrap an I/O error with the action and path that produced it
    pub fn io(action: &'static str, path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
