//! Standard I/O and formatting adapters for [`ChunkedBuffer`].

use std::fmt;
use std::io;

use super::ChunkedBuffer;

impl ChunkedBuffer {
    /// Writes every chunk to `writer` in order, then resets the buffer.
    ///
    /// Returns the number of bytes written. On error the buffer is still
    /// reset; whatever the writer already accepted is not replayed.
    ///
    /// # Example
    ///
    /// ```
    /// use chunkbuf::{ChunkedBuffer, Pool};
    ///
    /// let mut buf = ChunkedBuffer::with_pool(Pool::default());
    /// buf.write_str("{\"id\":1}");
    ///
    /// let mut out = Vec::new();
    /// assert_eq!(buf.dump_to(&mut out)?, 8);
    /// assert_eq!(out, b"{\"id\":1}");
    /// assert!(buf.is_empty());
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn dump_to<W: io::Write>(&mut self, mut writer: W) -> io::Result<usize> {
        let result = self.chunks().try_fold(0, |written, chunk| {
            writer.write_all(chunk.as_slice())?;
            Ok(written + chunk.len())
        });
        self.reset();
        result
    }
}

impl io::Write for ChunkedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        ChunkedBuffer::write(self, buf);
        Ok(buf.len())
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        ChunkedBuffer::write(self, buf);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Write for ChunkedBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        ChunkedBuffer::write_str(self, s);
        Ok(())
    }
}
