//! chunkbuf
//!
//! Chunked, size-classed byte buffers for serialization workloads.
//!
//! A [`ChunkedBuffer`] accepts bytes through an append-only surface and
//! grows by taking geometrically larger chunks from a [`Pool`] instead of
//! reallocating and copying. When the output has been consumed,
//! [`ChunkedBuffer::reset`] hands the chunks back, and the pool keeps the
//! ones worth keeping in lock-free free lists keyed by exact capacity.
//!
//! It is built for one pattern: write once, append only, drain fully,
//! repeat many times. The crate intentionally:
//! - does NOT replace a general-purpose allocator
//! - does NOT collect or report statistics
//! - does NOT synchronize a single buffer across writers
//!
//! # Example
//!
//! ```
//! use chunkbuf::{ChunkedBuffer, Pool, PoolConfig};
//!
//! let pool = Pool::new(PoolConfig::new(128, 512, 32768)?)?;
//! let mut buf = ChunkedBuffer::with_pool(pool.clone());
//!
//! buf.write_byte(b'{');
//! buf.write_str("\"msg\":\"Lorem ipsum\"");
//! buf.write_byte(b'}');
//! assert_eq!(buf.size(), 21);
//!
//! let mut out = Vec::new();
//! buf.dump_to(&mut out)?;
//! assert_eq!(out, br#"{"msg":"Lorem ipsum"}"#);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Process-wide pool
//!
//! [`ChunkedBuffer::new`] draws from [`Pool::global`]. Configure it once,
//! before serialization starts:
//!
//! ```
//! use chunkbuf::{ChunkedBuffer, Pool, PoolConfig};
//!
//! Pool::global().configure(PoolConfig::new(2048, 2048, 32768)?)?;
//!
//! let mut buf = ChunkedBuffer::new();
//! buf.write(b"payload");
//! assert_eq!(buf.chunks().next().map(|c| c.capacity()), Some(2048));
//! # Ok::<(), chunkbuf::PoolError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod buffer;
mod chunk;
mod config;
mod error;
mod pool;

//
// Public surface
//

pub use buffer::ChunkedBuffer;
pub use chunk::Chunk;
pub use config::{DEFAULT_MAX_SIZE, DEFAULT_POOLED_SIZE, DEFAULT_START_SIZE, PoolConfig};
pub use error::{PoolError, Result};
pub use pool::Pool;
