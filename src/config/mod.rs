//! Configuration for a split run.
//!
//! [`SplitConfig`] is an explicit value handed to the [`Chunker`](crate::Chunker);
//! there is no process-wide settings object.
//!
//! # Example
//!
//! ```no_run
//! use imgsplit::SplitConfig;
//!
//! let config = SplitConfig::new("/data/disk.img")?
//!     .with_chunk_size(1024 * 1024)
//!     .with_compact(true)
//!     .with_index_width(12);
//!
//! assert_eq!(config.base_name(), "disk");
//! assert_eq!(config.extension(), "img");
//! assert_eq!(config.output_dir(), std::path::Path::new("/data/disk_out"));
//! # Ok::<(), imgsplit::SplitError>(())
//! ```

use std::path::{Path, PathBuf};

use crate::error::SplitError;

/// Default chunk size (4 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 4 * 1024;

/// Suffix appended to the base name to form the default output directory.
pub const OUTPUT_DIR_SUFFIX: &str = "_out";

/// Configuration for splitting one source file.
///
/// `base_name` and `extension` are derived from the source file name:
/// the extension is the text after the final `.`, lower-cased, and the base
/// name is everything before it. A name without a dot (`firmware`) becomes
/// the base name as a whole and the extension is empty, so its chunks are
/// named `firmware-{index}` with no trailing dot.
///
/// The default output directory is `<source dir>/<base_name>_out`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConfig {
    source_path: PathBuf,
    chunk_size: usize,
    compact: bool,
    index_width: usize,
    output_dir: PathBuf,
    base_name: String,
    extension: String,
}

impl SplitConfig {
    /// Creates a configuration for `source_path` with default settings.
    ///
    /// Returns error if the path has no file name component. The file itself
    /// is not checked here; see [`SplitConfig::validate`].
    pub fn new(source_path: impl Into<PathBuf>) -> Result<Self, SplitError> {
        let source_path = source_path.into();
        let file_name = source_path
            .file_name()
            .ok_or(SplitError::InvalidConfig {
                message: "source path has no file name",
            })?
            .to_string_lossy()
            .into_owned();

        let (base_name, extension) = split_file_name(&file_name);
        let output_dir = source_path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(format!("{base_name}{OUTPUT_DIR_SUFFIX}"));

        Ok(Self {
            source_path,
            chunk_size: DEFAULT_CHUNK_SIZE,
            compact: false,
            index_width: 0,
            output_dir,
            base_name,
            extension,
        })
    }

    /// Sets the number of bytes read per chunk.
    ///
    /// Note: This does not validate the configuration. Use [`SplitConfig::validate`].
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Enables or disables compaction.
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Sets the minimum digit width of the file name index (0 = no padding).
    pub fn with_index_width(mut self, width: usize) -> Self {
        self.index_width = width;
        self
    }

    /// Overrides the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Returns the source file path.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Returns the chunk size in bytes.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns whether compaction is enabled.
    pub fn compact(&self) -> bool {
        self.compact
    }

    /// Returns the index width.
    pub fn index_width(&self) -> usize {
        self.index_width
    }

    /// Returns the output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the base name used for chunk files.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Returns the lower-cased extension used for chunk files.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Validates the current configuration.
    ///
    /// Checks that the chunk size is non-zero, the source path is absolute,
    /// the source exists and is not a directory, and the output directory
    /// does not contain the source.
    ///
    /// Block and character devices are accepted as sources.
    pub fn validate(&self) -> Result<(), SplitError> {
        if self.chunk_size == 0 {
            return Err(SplitError::InvalidConfig {
                message: "chunk size must be non-zero",
            });
        }

        if !self.source_path.is_absolute() {
            return Err(SplitError::InvalidConfig {
                message: "source path must be absolute",
            });
        }

        if !self.source_path.exists() {
            return Err(SplitError::SourceNotFound {
                path: self.source_path.clone(),
            });
        }

        if self.source_path.is_dir() {
            return Err(SplitError::InvalidConfig {
                message: "source path is a directory",
            });
        }

        // The output directory is wiped before a run; it must not hold the source.
        if let Ok(output_dir) = self.output_dir.canonicalize() {
            let source = self.source_path.canonicalize()?;
            if source.starts_with(&output_dir) {
                return Err(SplitError::InvalidConfig {
                    message: "output directory contains the source file",
                });
            }
        }

        Ok(())
    }
}

/// Splits a file name into `(base_name, extension)` at the final dot.
fn split_file_name(file_name: &str) -> (String, String) {
    match file_name.rsplit_once('.') {
        Some((base, ext)) => (base.to_string(), ext.trim().to_lowercase()),
        None => (file_name.to_string(), String::new()),
    }
}
