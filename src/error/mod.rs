//! Error types for imgsplit.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while configuring or running a split.
///
/// Configuration errors ([`SplitError::InvalidConfig`],
/// [`SplitError::SourceNotFound`]) are raised before any byte is read. All
/// other variants are I/O failures that abort the run where they happen;
/// chunk files already written stay on disk.
#[derive(Debug, Error)]
pub enum SplitError {
    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// The source file does not exist or is not a regular file.
    #[error("file {} does not exist", path.display())]
    SourceNotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// Reading the source failed, or it ended before its recorded length.
    #[error("read failed at offset {offset}")]
    Read {
        /// Offset of the chunk being read.
        offset: u64,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Creating or writing a chunk file failed.
    #[error("write of {} (chunk at offset {offset}) failed", path.display())]
    Write {
        /// The chunk file being written.
        path: PathBuf,
        /// Offset of the chunk in the source.
        offset: u64,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Removing or creating the output directory failed.
    #[error("can't prepare folder {}", path.display())]
    OutputDir {
        /// The output directory.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Overwriting an existing output directory was declined.
    #[error("folder {} already exists", path.display())]
    Aborted {
        /// The output directory that was kept.
        path: PathBuf,
    },

    /// Any other I/O error.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl SplitError {
    /// Returns true for errors raised while validating configuration, before
    /// the run starts.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            SplitError::InvalidConfig { .. } | SplitError::SourceNotFound { .. }
        )
    }

    /// Returns the source offset the error occurred at, if it happened mid-run.
    pub fn offset(&self) -> Option<u64> {
        match self {
            SplitError::Read { offset, .. } | SplitError::Write { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}
