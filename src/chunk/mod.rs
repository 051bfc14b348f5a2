//! Chunk types.
//!
//! - [`Chunk`] - Fixed-size window of the source with its offset

mod data;

pub use data::Chunk;
