//! Lossy compaction of a single chunk.
//!
//! A chunk with no non-zero byte is dropped. Any other chunk loses the zero
//! bytes at its end, so what is written always ends in a non-zero byte.

use crate::chunk::Chunk;

/// Outcome of compacting one chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compacted {
    /// The chunk was all zeros and must not be written.
    Skipped {
        /// Length of the dropped chunk.
        len: usize,
    },

    /// The chunk survives, possibly shortened.
    Kept {
        /// The chunk to write.
        chunk: Chunk,
        /// Number of trailing zero bytes removed.
        trimmed: usize,
    },
}

/// Applies compaction to `chunk`.
pub fn compact(chunk: Chunk) -> Compacted {
    if chunk.is_all_zero() {
        return Compacted::Skipped { len: chunk.len() };
    }

    let (chunk, trimmed) = chunk.trim_trailing_zeros();
    Compacted::Kept { chunk, trimmed }
}
