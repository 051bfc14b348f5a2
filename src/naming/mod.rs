//! Output file naming.
//!
//! Chunk files are named `{base_name}-{index}.{extension}`, where `index` is
//! the byte offset of the chunk in the source, zero-padded to the configured
//! width.

use std::path::{Path, PathBuf};

use crate::config::SplitConfig;

/// Formats `n` in decimal, left-padded with `'0'` to at least `width` digits.
///
/// A width of 0, or a number already at least `width` digits long, gets no
/// padding. The result is never truncated.
///
/// ```
/// use imgsplit::pad_index;
///
/// assert_eq!(pad_index(4, 128), "0128");
/// assert_eq!(pad_index(0, 128), "128");
/// assert_eq!(pad_index(2, 12345), "12345");
/// ```
pub fn pad_index(width: usize, n: u64) -> String {
    format!("{n:0width$}")
}

/// Builds chunk file names for one run.
#[derive(Debug, Clone)]
pub struct ChunkNamer {
    base_name: String,
    extension: String,
    width: usize,
}

impl ChunkNamer {
    /// Creates a namer.
    pub fn new(base_name: impl Into<String>, extension: impl Into<String>, width: usize) -> Self {
        Self {
            base_name: base_name.into(),
            extension: extension.into(),
            width,
        }
    }

    /// Creates a namer from a split configuration.
    pub fn from_config(config: &SplitConfig) -> Self {
        Self::new(config.base_name(), config.extension(), config.index_width())
    }

    /// Returns the file name for the chunk at `index`.
    ///
    /// The dot is omitted when the extension is empty.
    pub fn file_name(&self, index: u64) -> String {
        let index = pad_index(self.width, index);
        if self.extension.is_empty() {
            format!("{}-{}", self.base_name, index)
        } else {
            format!("{}-{}.{}", self.base_name, index, self.extension)
        }
    }

    /// Returns the full path of the chunk at `index` inside `dir`.
    pub fn path_in(&self, dir: &Path, index: u64) -> PathBuf {
        dir.join(self.file_name(index))
    }
}
