//! Core split engine - reads a file in fixed-size windows and writes each
//! surviving window to its own file.
//!
//! # Example
//!
//! ```no_run
//! use imgsplit::{Chunker, NoProgress, SplitConfig};
//!
//! let config = SplitConfig::new("/images/disk.img")?.with_compact(true);
//! std::fs::create_dir_all(config.output_dir())?;
//!
//! let stats = Chunker::new(config).run(NoProgress)?;
//! println!("{} chunks written", stats.written_chunks);
//! # Ok::<(), imgsplit::SplitError>(())
//! ```

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, trace};

use super::ChunkIter;
use crate::chunk::Chunk;
use crate::compact::{Compacted, compact};
use crate::config::SplitConfig;
use crate::error::SplitError;
use crate::naming::ChunkNamer;
use crate::progress::ProgressSink;
use crate::stats::RunStatistics;

/// Splits one source file into numbered chunk files.
///
/// For every chunk read at offset `o`, the file
/// `{base_name}-{o}.{extension}` is created in the output directory, with `o`
/// zero-padded to the configured index width. The numeric suffix is the byte
/// offset, so it grows by `chunk_size` per chunk, and chunks dropped by
/// compaction leave gaps in the sequence.
///
/// Empty chunks (the terminating read when the source length is a multiple of
/// the chunk size) are never written and never counted as skipped.
///
/// The output directory must exist. The `Chunker` does not clear it or check
/// that it is empty; an existing file with a chunk's name is a
/// [`SplitError::Write`].
#[derive(Debug, Clone)]
pub struct Chunker {
    config: SplitConfig,
}

impl Chunker {
    /// Creates a new chunker with the given configuration.
    pub fn new(config: SplitConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration used by this chunker.
    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Splits the configured source file.
    ///
    /// Validates the configuration, then reads the source in a single pass,
    /// reporting progress after every chunk. The source handle is closed on
    /// return, on success or error.
    ///
    /// # Errors
    ///
    /// Configuration errors from [`SplitConfig::validate`]; otherwise
    /// [`SplitError::Read`] or [`SplitError::Write`] with the offset of the
    /// failing chunk. Chunk files written before the failure are left in place.
    pub fn run<P: ProgressSink>(&self, progress: P) -> Result<RunStatistics, SplitError> {
        self.config.validate()?;

        let start = Instant::now();
        let path = self.config.source_path();
        let mut file = File::open(path).map_err(|source| SplitError::Read { offset: 0, source })?;
        let total_length =
            source_length(&mut file).map_err(|source| SplitError::Read { offset: 0, source })?;

        info!(
            source = %path.display(),
            total_length,
            chunk_size = self.config.chunk_size(),
            compact = self.config.compact(),
            "splitting"
        );

        self.split(file, total_length, progress, start)
    }

    /// Splits a seekable reader, measuring its length by seeking to the end.
    ///
    /// The reader is rewound to offset 0 before the first chunk is read.
    pub fn split_seekable<R: Read + Seek, P: ProgressSink>(
        &self,
        mut reader: R,
        progress: P,
    ) -> Result<RunStatistics, SplitError> {
        let total_length =
            source_length(&mut reader).map_err(|source| SplitError::Read { offset: 0, source })?;
        self.split(reader, total_length, progress, Instant::now())
    }

    /// Splits an arbitrary reader of known length into the output directory.
    ///
    /// This is the loop behind [`Chunker::run`]; the source path in the
    /// configuration is not used. `total_length` must be the number of bytes
    /// the reader will yield.
    pub fn split_reader<R: Read, P: ProgressSink>(
        &self,
        reader: R,
        total_length: u64,
        progress: P,
    ) -> Result<RunStatistics, SplitError> {
        self.split(reader, total_length, progress, Instant::now())
    }

    fn split<R: Read, P: ProgressSink>(
        &self,
        reader: R,
        total_length: u64,
        mut progress: P,
        start: Instant,
    ) -> Result<RunStatistics, SplitError> {
        let chunk_size = self.config.chunk_size();
        let namer = ChunkNamer::from_config(&self.config);
        let mut stats = RunStatistics {
            total_length,
            ..RunStatistics::default()
        };

        progress.begin(total_length);
        for chunk in ChunkIter::new(reader, chunk_size, total_length) {
            let chunk = chunk?;
            let done = chunk
                .offset()
                .saturating_add(chunk_size as u64)
                .min(total_length);

            self.process(chunk, &namer, &mut stats)?;
            progress.update(done, total_length);
        }
        progress.end();

        stats.elapsed = start.elapsed();
        info!(
            written = stats.written_chunks,
            skipped = stats.skipped_chunks,
            compressed_bytes = stats.compressed_bytes,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "split finished"
        );
        Ok(stats)
    }

    /// Compacts (if enabled) and writes one chunk.
    fn process(
        &self,
        chunk: Chunk,
        namer: &ChunkNamer,
        stats: &mut RunStatistics,
    ) -> Result<(), SplitError> {
        if chunk.is_empty() {
            trace!(offset = chunk.offset(), "end of source");
            return Ok(());
        }

        let offset = chunk.offset();
        let chunk = if self.config.compact() {
            match compact(chunk) {
                Compacted::Skipped { len } => {
                    debug!(offset, len, "skipped all-zero chunk");
                    stats.skipped_chunks += 1;
                    stats.skipped_bytes += len as u64;
                    return Ok(());
                }
                Compacted::Kept { chunk, trimmed } => {
                    if trimmed > 0 {
                        trace!(offset, trimmed, "trimmed trailing zeros");
                    }
                    stats.compressed_bytes += trimmed as u64;
                    chunk
                }
            }
        } else {
            chunk
        };

        let path = namer.path_in(self.config.output_dir(), offset);
        write_chunk(&path, &chunk)?;
        debug!(path = %path.display(), len = chunk.len(), "wrote chunk");

        stats.written_chunks += 1;
        stats.written_bytes += chunk.len() as u64;
        Ok(())
    }
}

/// Returns the number of bytes readable from `source` and rewinds it.
///
/// Seeking works for block devices, whose metadata reports a length of 0.
fn source_length<S: Seek>(source: &mut S) -> io::Result<u64> {
    let len = source.seek(SeekFrom::End(0))?;
    source.rewind()?;
    Ok(len)
}

/// Writes `chunk` to a new file at `path`. The file is closed before return.
fn write_chunk(path: &Path, chunk: &Chunk) -> Result<(), SplitError> {
    let write_err = |source| SplitError::Write {
        path: path.to_path_buf(),
        offset: chunk.offset(),
        source,
    };

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(write_err)?;
    file.write_all(chunk.data()).map_err(write_err)?;
    file.flush().map_err(write_err)
}
