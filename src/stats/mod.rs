//! Run statistics and the end-of-run summary.

use std::fmt;
use std::time::Duration;

/// Statistics accumulated by one split run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Chunks dropped because they were all zeros.
    pub skipped_chunks: u64,
    /// Total length of the dropped chunks.
    pub skipped_bytes: u64,
    /// Trailing zero bytes trimmed from kept chunks.
    pub compressed_bytes: u64,
    /// Chunk files written.
    pub written_chunks: u64,
    /// Bytes written across all chunk files.
    pub written_bytes: u64,
    /// Size of the source file.
    pub total_length: u64,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

impl RunStatistics {
    /// Bytes of the source that were not written.
    pub fn saved_bytes(&self) -> u64 {
        self.skipped_bytes + self.compressed_bytes
    }

    /// Bytes of the source that remain after compaction.
    pub fn remaining_bytes(&self) -> u64 {
        self.total_length.saturating_sub(self.saved_bytes())
    }

    /// Returns a printable summary. Compaction lines are included only when
    /// `compact` is true.
    pub fn summary(&self, compact: bool) -> Summary<'_> {
        Summary {
            stats: self,
            compact,
        }
    }
}

/// Human-readable end-of-run report. Sizes are in decimal kilobytes.
#[derive(Debug)]
pub struct Summary<'a> {
    stats: &'a RunStatistics,
    compact: bool,
}

fn kilobytes(bytes: u64) -> f64 {
    bytes as f64 / 1000.0
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Splitting finished in {}s.",
            self.stats.elapsed.as_secs_f64()
        )?;
        if self.compact {
            write!(
                f,
                "\nCompressor skipped {} times.",
                self.stats.skipped_chunks
            )?;
            write!(
                f,
                "\nTotal compressed: {} KB.",
                kilobytes(self.stats.saved_bytes())
            )?;
            write!(
                f,
                "\nTotal size: {} KB.",
                kilobytes(self.stats.remaining_bytes())
            )?;
        }
        Ok(())
    }
}
