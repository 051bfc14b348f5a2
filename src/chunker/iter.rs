//! Fixed-size windows over a reader.

use std::io::Read;

use bytes::BytesMut;

use crate::chunk::Chunk;
use crate::error::SplitError;

/// An iterator that yields fixed-size chunks from a reader of known length.
///
/// Chunks start at offsets `0, chunk_size, 2 * chunk_size, ...` and the
/// iterator keeps going while the offset is `<= total_length`. That means it
/// always yields at least one chunk, and when `total_length` is a multiple of
/// `chunk_size` (including 0) the last chunk is empty. In total it yields
/// `total_length / chunk_size + 1` chunks.
///
/// Only one chunk is held in memory at a time. If the reader ends before
/// `total_length` bytes, the iterator yields [`SplitError::Read`] with
/// [`std::io::ErrorKind::UnexpectedEof`] and stops.
///
/// # Example
///
/// ```
/// use imgsplit::ChunkIter;
/// use std::io::Cursor;
///
/// let data = vec![7u8; 10];
/// let lens: Vec<usize> = ChunkIter::new(Cursor::new(&data), 4, 10)
///     .map(|c| c.map(|c| c.len()))
///     .collect::<Result<_, _>>()?;
///
/// assert_eq!(lens, vec![4, 4, 2]);
/// # Ok::<(), imgsplit::SplitError>(())
/// ```
pub struct ChunkIter<R> {
    reader: R,
    chunk_size: usize,
    total_length: u64,
    offset: u64,
    finished: bool,
}

impl<R: Read> ChunkIter<R> {
    /// Creates a new chunk iterator.
    ///
    /// `chunk_size` must be non-zero; a zero size yields a single
    /// [`SplitError::InvalidConfig`].
    pub fn new(reader: R, chunk_size: usize, total_length: u64) -> Self {
        Self {
            reader,
            chunk_size,
            total_length,
            offset: 0,
            finished: false,
        }
    }

    /// Returns the offset of the next chunk to be read.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Number of bytes the chunk at the current offset should contain.
    fn expected_len(&self) -> usize {
        let remaining = self.total_length - self.offset;
        remaining.min(self.chunk_size as u64) as usize
    }
}

impl<R: Read> Iterator for ChunkIter<R> {
    type Item = Result<Chunk, SplitError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if self.chunk_size == 0 {
            self.finished = true;
            return Some(Err(SplitError::InvalidConfig {
                message: "chunk size must be non-zero",
            }));
        }

        if self.offset > self.total_length {
            self.finished = true;
            return None;
        }

        let offset = self.offset;
        let mut buf = BytesMut::zeroed(self.expected_len());
        if let Err(source) = self.reader.read_exact(&mut buf) {
            self.finished = true;
            return Some(Err(SplitError::Read { offset, source }));
        }

        self.offset = offset.saturating_add(self.chunk_size as u64);
        // Saturated: nothing past this offset can be addressed.
        if self.offset == u64::MAX {
            self.finished = true;
        }

        Some(Ok(Chunk::new(buf.freeze(), offset)))
    }
}
