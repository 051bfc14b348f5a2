//! imgsplit
//!
//! Split a file into fixed-size chunk files, with optional zero compaction.
//!
//! `imgsplit` reads a source file sequentially in windows of `chunk_size`
//! bytes and writes each window to its own file, named after the byte offset
//! it was read at. It is meant for large, mostly-empty files such as disk
//! and flash images:
//!
//! - chunk files are `{base_name}-{offset}.{extension}`, offset zero-padded
//!   to a configurable width
//! - with compaction, all-zero windows are dropped and trailing zero bytes
//!   are trimmed, so the output only holds the non-zero data
//!
//! The crate intentionally:
//! - does NOT reassemble chunks
//! - does NOT checksum chunks
//! - does NOT split in parallel
//! - does NOT resume interrupted runs
//!
//! # Example
//!
//! ```no_run
//! use imgsplit::{AlwaysOverwrite, Chunker, NoProgress, SplitConfig, prepare_output_dir};
//!
//! fn main() -> Result<(), imgsplit::SplitError> {
//!     let config = SplitConfig::new("/images/sdcard.img")?
//!         .with_chunk_size(1024 * 1024)
//!         .with_compact(true)
//!         .with_index_width(12);
//!
//!     prepare_output_dir(config.output_dir(), &mut AlwaysOverwrite)?;
//!     let stats = Chunker::new(config).run(NoProgress)?;
//!
//!     println!("{}", stats.summary(true));
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunk;
mod chunker;
mod compact;
mod config;
mod error;
mod naming;
mod outdir;
mod progress;
mod stats;

//
// Public surface
//

pub use chunk::Chunk;
pub use chunker::{ChunkIter, Chunker};
pub use compact::{Compacted, compact};
pub use config::{DEFAULT_CHUNK_SIZE, OUTPUT_DIR_SUFFIX, SplitConfig};
pub use error::SplitError;
pub use naming::{ChunkNamer, pad_index};
pub use outdir::{AlwaysOverwrite, Confirm, NeverOverwrite, Prompt, prepare_output_dir};
pub use progress::{NoProgress, ProgressFn, ProgressSink, progress_bar};
pub use stats::{RunStatistics, Summary};
