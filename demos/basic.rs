//! Serialize a few records into a chunked buffer and inspect the chunks.
//!
//! Run with:
//!     cargo run --example basic

use std::io::Write;

use chunkbuf::{ChunkedBuffer, Pool, PoolConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let pool = Pool::new(PoolConfig::default())?;
    let mut buf = ChunkedBuffer::with_pool(pool.clone());

    for run in 0..3 {
        buf.write_byte(b'[');
        for id in 0..200 {
            if id > 0 {
                buf.write_byte(b',');
            }
            write!(buf, "{{\"id\":{id},\"name\":\"record-{id}\"}}")?;
        }
        buf.write_byte(b']');

        println!("run {run}: {} bytes in {} chunks", buf.size(), buf.chunk_count());
        for (i, chunk) in buf.chunks().enumerate() {
            println!("  chunk {i}: {chunk}");
        }

        let mut out = Vec::new();
        buf.dump_to(&mut out)?;
        println!("  drained {} bytes", out.len());
    }

    for size in pool.config().size_classes() {
        println!("pooled {size:>6}: {}", pool.pooled_count(size));
    }

    Ok(())
}
