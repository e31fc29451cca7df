//! The Chunk type - one fixed-capacity, variable-length byte buffer.

use std::fmt;

/// A single fixed-capacity byte buffer.
///
/// A chunk never grows: its nominal capacity is fixed when the pool hands
/// it out, and writes are clamped to the remaining space. Keeping the
/// capacity fixed is what lets the pool key free lists by exact size.
///
/// # Example
///
/// ```
/// use chunkbuf::Pool;
///
/// let pool = Pool::default();
/// let mut chunk = pool.acquire(128);
///
/// assert_eq!(chunk.capacity(), 128);
/// assert_eq!(chunk.push_slice(b"hello"), 5);
/// assert_eq!(chunk.as_slice(), b"hello");
/// assert_eq!(chunk.remaining(), 123);
/// ```
pub struct Chunk {
    data: Vec<u8>,
    capacity: usize,
}

impl Chunk {
    /// Allocates an empty chunk with room for exactly `capacity` bytes.
    pub(crate) fn alloc(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Zero-capacity placeholder; owns no storage.
    pub(crate) const fn empty() -> Self {
        Self {
            data: Vec::new(),
            capacity: 0,
        }
    }

    /// Returns the nominal capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of bytes written.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if nothing has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the free space left in the chunk.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity - self.data.len()
    }

    /// Returns true if no more bytes fit.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.data.len() == self.capacity
    }

    /// Returns the written bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Appends as much of `src` as fits and returns the number of bytes taken.
    #[inline]
    pub fn push_slice(&mut self, src: &[u8]) -> usize {
        let n = src.len().min(self.remaining());
        self.data.extend_from_slice(&src[..n]);
        n
    }

    /// Appends one byte. Returns false if the chunk is full.
    #[inline]
    pub fn push(&mut self, byte: u8) -> bool {
        if self.is_full() {
            return false;
        }
        self.data.push(byte);
        true
    }

    /// Truncates to length 0 without releasing storage.
    pub(crate) fn clear(&mut self) {
        self.data.clear();
    }

    /// Consumes the chunk and returns the written bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl AsRef<[u8]> for Chunk {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl fmt::Debug for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chunk")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chunk({}/{} bytes)", self.len(), self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc() {
        let chunk = Chunk::alloc(64);
        assert_eq!(chunk.capacity(), 64);
        assert!(chunk.is_empty());
        assert!(!chunk.is_full());
        assert_eq!(chunk.remaining(), 64);
    }

    #[test]
    fn test_empty_placeholder_is_full() {
        let mut chunk = Chunk::empty();
        assert_eq!(chunk.capacity(), 0);
        assert!(chunk.is_full());
        assert!(!chunk.push(b'x'));
        assert_eq!(chunk.push_slice(b"x"), 0);
    }

    #[test]
    fn test_push_slice_clamps() {
        let mut chunk = Chunk::alloc(4);
        assert_eq!(chunk.push_slice(b"hello"), 4);
        assert_eq!(chunk.as_slice(), b"hell");
        assert!(chunk.is_full());
        assert_eq!(chunk.push_slice(b"o"), 0);
    }

    #[test]
    fn test_push_byte() {
        let mut chunk = Chunk::alloc(2);
        assert!(chunk.push(b'{'));
        assert!(chunk.push(b'}'));
        assert!(!chunk.push(b','));
        assert_eq!(chunk.as_slice(), b"{}");
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut chunk = Chunk::alloc(16);
        chunk.push_slice(b"data");
        chunk.clear();
        assert!(chunk.is_empty());
        assert_eq!(chunk.capacity(), 16);
        assert!(chunk.data.capacity() >= 16);
    }

    #[test]
    fn test_display() {
        let mut chunk = Chunk::alloc(8);
        chunk.push_slice(b"abc");
        assert_eq!(format!("{}", chunk), "Chunk(3/8 bytes)");
    }

    #[test]
    fn test_into_vec() {
        let mut chunk = Chunk::alloc(8);
        chunk.push_slice(b"abc");
        assert_eq!(chunk.into_vec(), b"abc".to_vec());
    }
}
