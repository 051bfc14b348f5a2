//! Split engine.
//!
//! - [`Chunker`] - Runs a split of one source file into chunk files
//! - [`ChunkIter`] - Fixed-size windows over any [`std::io::Read`]

mod engine;
mod iter;

pub use engine::Chunker;
pub use iter::ChunkIter;
