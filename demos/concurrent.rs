//! One buffer per worker thread, all sharing the process-wide pool.
//!
//! Run with:
//!     cargo run --example concurrent

use std::thread;

use chunkbuf::{ChunkedBuffer, Pool, PoolConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    Pool::global().configure(PoolConfig::new(2048, 2048, 32768)?)?;

    let workers = thread::available_parallelism().map_or(4, |n| n.get());
    let totals: Vec<usize> = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                scope.spawn(move || {
                    let mut buf = ChunkedBuffer::new();
                    let mut total = 0;
                    for run in 0..10_000 {
                        buf.write_str("Lorem ipsum dolor sit amet, ");
                        buf.write_str(&format!("worker {worker} run {run}"));
                        total += buf.dump_to(std::io::sink()).unwrap_or(0);
                    }
                    total
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap_or(0)).collect()
    });

    for (worker, total) in totals.iter().enumerate() {
        println!("worker {worker}: {total} bytes serialized");
    }
    println!("pooled 2048: {}", Pool::global().pooled_count(2048));

    Ok(())
}
