//! Append-only buffer built from pooled chunks.

use bytes::Bytes;

use crate::chunk::Chunk;
use crate::pool::Pool;

/// An append-only byte buffer optimized for serialization.
///
/// Bytes go into the *active* chunk. When it runs out of space the
/// chunk is sealed (kept in write order, never touched again) and a new
/// chunk twice as large is taken from the [`Pool`], up to `max_size`.
/// Nothing written is ever copied to grow the buffer.
///
/// [`reset`](ChunkedBuffer::reset) hands every chunk back to the pool and
/// leaves the buffer empty and ready for reuse. Dropping the buffer does
/// the same.
///
/// A buffer is single-writer: all mutation goes through `&mut self`. Use
/// one buffer per worker and share the [`Pool`] instead.
///
/// # Example
///
/// ```
/// use chunkbuf::{ChunkedBuffer, Pool, PoolConfig};
///
/// let pool = Pool::new(PoolConfig::default())?;
/// let mut buf = ChunkedBuffer::with_pool(pool);
///
/// buf.write_byte(b'[');
/// buf.write(b"1,2,3");
/// buf.write_byte(b']');
///
/// assert_eq!(buf.size(), 7);
/// assert_eq!(buf.to_vec(), b"[1,2,3]");
///
/// buf.reset();
/// assert!(buf.is_empty());
/// # Ok::<(), chunkbuf::PoolError>(())
/// ```
#[derive(Debug)]
pub struct ChunkedBuffer {
    /// Receives writes. Zero capacity while the buffer is empty.
    active: Chunk,
    sealed: Vec<Chunk>,
    pool: Pool,
}

impl ChunkedBuffer {
    /// Creates an empty buffer backed by [`Pool::global`].
    pub fn new() -> Self {
        Self::with_pool(Pool::global().clone())
    }

    /// Creates an empty buffer backed by `pool`.
    ///
    /// No chunk is acquired until the first write.
    pub fn with_pool(pool: Pool) -> Self {
        Self {
            active: Chunk::empty(),
            sealed: Vec::new(),
            pool,
        }
    }

    /// Returns the pool this buffer draws chunks from.
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// Makes sure the active chunk has at least `n` free bytes.
    ///
    /// An empty buffer starts with a `start_size` chunk. A buffer that is
    /// already writing seals its active chunk and moves on to one of
    /// `min(max_size, 2 * previous capacity)`. In both cases a larger `n`
    /// raises the request to the next power of two, keeping the chunk
    /// poolable; only a request above `max_size` yields one chunk of
    /// exactly `n` bytes.
    pub fn ensure_space(&mut self, n: usize) {
        if self.active.remaining() >= n {
            return;
        }

        let config = self.pool.config();
        let growth = match self.active.capacity() {
            0 => config.start_size(),
            previous => config.next_chunk_size(previous),
        };
        let target = config.chunk_size_for(growth, n);

        let previous = std::mem::replace(&mut self.active, self.pool.acquire(target));
        if previous.is_empty() {
            self.pool.release(previous);
        } else {
            self.sealed.push(previous);
        }
    }

    /// Appends `data`, spilling into new chunks as needed.
    ///
    /// Each chunk boundary crossed costs exactly one new chunk; a
    /// zero-length write does nothing.
    pub fn write(&mut self, mut data: &[u8]) {
        while !data.is_empty() {
            if self.active.is_full() {
                self.ensure_space(1);
            }
            let n = self.active.push_slice(data);
            data = &data[n..];
        }
    }

    /// Appends a single byte.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        if self.active.is_full() {
            self.ensure_space(1);
        }
        let pushed = self.active.push(byte);
        debug_assert!(pushed, "ensure_space(1) left no room");
    }

    /// Appends a string.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.write(s.as_bytes());
    }

    /// Returns the total number of bytes written since the last reset.
    pub fn size(&self) -> usize {
        self.sealed.iter().map(Chunk::len).sum::<usize>() + self.active.len()
    }

    /// Returns true if nothing has been written since the last reset.
    pub fn is_empty(&self) -> bool {
        self.sealed.is_empty() && self.active.is_empty()
    }

    /// Iterates over every chunk in write order, active chunk last.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> + '_ {
        let active = Some(&self.active).filter(|chunk| chunk.capacity() > 0);
        self.sealed.iter().chain(active)
    }

    /// Returns the number of chunks currently held.
    pub fn chunk_count(&self) -> usize {
        self.sealed.len() + usize::from(self.active.capacity() > 0)
    }

    /// Copies the whole content into one contiguous vector.
    ///
    /// The buffer keeps its chunks.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size());
        for chunk in self.chunks() {
            out.extend_from_slice(chunk.as_slice());
        }
        out
    }

    /// Drains the buffer into a single [`Bytes`] and resets it.
    ///
    /// When everything fits in one chunk, its storage becomes the result
    /// and is not returned to the pool; otherwise the content is copied
    /// into one allocation and all chunks go back to the pool.
    pub fn build_bytes(&mut self) -> Bytes {
        if self.sealed.is_empty() {
            let chunk = std::mem::replace(&mut self.active, Chunk::empty());
            return Bytes::from(chunk.into_vec());
        }

        let out = Bytes::from(self.to_vec());
        self.reset();
        out
    }

    /// Returns every chunk to the pool and empties the buffer.
    ///
    /// Each chunk is released exactly once; the buffer can be written to
    /// again immediately.
    pub fn reset(&mut self) {
        for chunk in self.sealed.drain(..) {
            self.pool.release(chunk);
        }
        let active = std::mem::replace(&mut self.active, Chunk::empty());
        self.pool.release(active);
    }
}

impl Default for ChunkedBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ChunkedBuffer {
    fn drop(&mut self) {
        self.reset();
    }
}
