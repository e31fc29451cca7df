#![no_main]

use libfuzzer_sys::fuzz_target;
use chunkbuf::{ChunkedBuffer, Pool, PoolConfig};

fuzz_target!(|data: Vec<u8>| {
    let configs = vec![
        // Tiny chunks, every class pooled
        PoolConfig::new(4, 4, 64).unwrap(),
        // Small start, narrow pool
        PoolConfig::new(16, 256, 512).unwrap(),
        // Default config
        PoolConfig::default(),
    ];

    for config in configs {
        let pool = Pool::new(config).unwrap();
        let mut buf = ChunkedBuffer::with_pool(pool.clone());

        // Decode the input into writes: a control byte picks the op and
        // the length of the following slice.
        let mut expected = Vec::new();
        let mut rest = &data[..];
        while let Some((&ctl, tail)) = rest.split_first() {
            let len = (ctl as usize >> 2).min(tail.len());
            let (piece, tail) = tail.split_at(len);
            match ctl & 3 {
                0 => {
                    buf.write_byte(ctl);
                    expected.push(ctl);
                }
                1 => buf.ensure_space(len * 8),
                _ => {
                    buf.write(piece);
                    expected.extend_from_slice(piece);
                }
            }
            rest = tail;

            // Verify: size tracks every byte written
            assert_eq!(buf.size(), expected.len());
        }

        // Verify: chunks reproduce the stream in order
        assert_eq!(buf.to_vec(), expected);

        // Verify: no chunk holds more than its capacity, and every chunk
        // within the ceiling is a poolable power of two
        for chunk in buf.chunks() {
            assert!(chunk.len() <= chunk.capacity());
            if chunk.capacity() <= config.max_size() {
                assert!(chunk.capacity().is_power_of_two());
            }
        }

        // Verify: reset leaves an empty, reusable buffer
        buf.reset();
        assert_eq!(buf.size(), 0);
        buf.write(&data);
        assert_eq!(buf.build_bytes(), data);
    }
});
