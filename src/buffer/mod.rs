//! Chunked, append-only output buffers.
//!
//! - [`ChunkedBuffer`] - Write surface that grows by pooled chunks
//!
//! The `io` submodule adds `std::io::Write` / `std::fmt::Write` support
//! and [`ChunkedBuffer::dump_to`].

mod chunked;
mod io;

pub use chunked::ChunkedBuffer;
