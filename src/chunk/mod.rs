//! Chunk types.
//!
//! - [`Chunk`] - Fixed-capacity byte buffer, the unit the pool hands out

mod data;

pub use data::Chunk;
