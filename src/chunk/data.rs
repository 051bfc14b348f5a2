//! The Chunk type - one fixed-size window of the source file.

use bytes::Bytes;
use std::fmt;

/// A window of the source file read in one iteration.
///
/// # Example
///
/// ```
/// use imgsplit::Chunk;
///
/// let chunk = Chunk::new(&b"\x01\x00\x00"[..], 4096);
/// let (trimmed, removed) = chunk.trim_trailing_zeros();
///
/// assert_eq!(trimmed.data().as_ref(), b"\x01");
/// assert_eq!(removed, 2);
/// assert_eq!(trimmed.offset(), 4096);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk data.
    pub data: Bytes,

    /// The offset of the first byte in the source file.
    pub offset: u64,
}

impl Chunk {
    /// Creates a new chunk read at `offset`.
    pub fn new(data: impl Into<Bytes>, offset: u64) -> Self {
        Self {
            data: data.into(),
            offset,
        }
    }

    /// Returns the length of the chunk data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the chunk has no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a reference to the chunk data.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Returns the offset in the source file.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the end offset (exclusive).
    pub fn end(&self) -> u64 {
        self.offset + self.data.len() as u64
    }

    /// Returns the chunk as a range of the source file.
    pub fn range(&self) -> std::ops::Range<u64> {
        self.offset..self.end()
    }

    /// Returns the index of the last non-zero byte, or `None` if every byte
    /// is zero (or the chunk is empty).
    pub fn last_non_zero(&self) -> Option<usize> {
        self.data.iter().rposition(|&b| b != 0)
    }

    /// Returns true if the chunk contains no non-zero byte.
    ///
    /// An empty chunk counts as all-zero.
    pub fn is_all_zero(&self) -> bool {
        self.last_non_zero().is_none()
    }

    /// Removes zero bytes from the end of the chunk only.
    ///
    /// Returns the trimmed chunk and the number of bytes removed. Leading and
    /// interior zeros are kept. The slice is zero-copy.
    pub fn trim_trailing_zeros(self) -> (Chunk, usize) {
        let keep = self.last_non_zero().map_or(0, |i| i + 1);
        let removed = self.data.len() - keep;
        let data = self.data.slice(..keep);
        (
            Chunk {
                data,
                offset: self.offset,
            },
            removed,
        )
    }

    /// Consumes the chunk and returns the underlying data.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chunk({} bytes @ {})", self.len(), self.offset)
    }
}
