//! Error types shared by every line-production strategy

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Boxed error returned by consumer callbacks
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced while opening or scanning a line source
#[derive(Error, Debug)]
pub enum Error {
    /// The path could not be opened for reading
    #[error("failed to open {path:?}: {source}")]
    Open {
        /// Path that was requested
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The scanning facility refused to start
    #[error("cannot scan {path:?}: {reason}")]
    ScanInit {
        /// Path (or reader label) being bound
        path: PathBuf,
        /// Why the pre-flight check failed
        reason: String,
    },

    /// Reading failed part way through the source
    #[error("scan failed at line {line}: {source}")]
    Scan {
        /// 1-based number of the line being read when the failure happened
        line: usize,
        /// Underlying I/O or decoding error
        #[source]
        source: io::Error,
    },

    /// The consumer callback asked to stop
    #[error("callback failed: {0}")]
    Callback(#[source] BoxError),

    /// The background producer could not be started
    #[error("failed to spawn producer thread: {0}")]
    Spawn(#[source] io::Error),
}

impl Error {
    /// Whether this error was raised while opening the path
    pub fn is_open(&self) -> bool {
        matches!(self, Error::Open { .. })
    }

    /// Whether this error was raised mid-stream
    pub fn is_scan(&self) -> bool {
        matches!(self, Error::Scan { .. })
    }

    /// Whether this error came from a consumer callback
    pub fn is_callback(&self) -> bool {
        matches!(self, Error::Callback(_))
    }

    pub(crate) fn scan_init(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::ScanInit {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for line-source operations
pub type Result<T> = std::result::Result<T, Error>;
