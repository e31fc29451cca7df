//! Size-classed chunk pool.
//!
//! The pool keeps one lock-free free list per power-of-two capacity in
//! `[pooled_size, max_size]`. Size classes are independent: contention on
//! one never blocks another, and no operation here blocks at all.
//!
//! [`Pool::configure`] swaps in a freshly built registry. Chunks pooled
//! under the previous configuration are abandoned with the old registry,
//! and chunks released later that match no current class are dropped.
//!
//! # Example
//!
//! ```
//! use chunkbuf::{Pool, PoolConfig};
//!
//! let pool = Pool::new(PoolConfig::default())?;
//!
//! let chunk = pool.acquire(1024);
//! assert_eq!(chunk.capacity(), 1024);
//!
//! pool.release(chunk);
//! assert_eq!(pool.pooled_count(1024), 1);
//! # Ok::<(), chunkbuf::PoolError>(())
//! ```

mod registry;

use std::fmt;
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;

use crate::chunk::Chunk;
use crate::config::PoolConfig;
use crate::error::Result;

use registry::Registry;

static GLOBAL_POOL: LazyLock<Pool> = LazyLock::new(Pool::default);

/// A shared, size-classed pool of chunks.
///
/// `Pool` is a cheap handle: cloning it shares the same free lists.
#[derive(Clone)]
pub struct Pool {
    registry: Arc<ArcSwap<Registry>>,
}

impl Pool {
    /// Creates a pool with its own free lists.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`](crate::PoolError::InvalidConfig)
    /// if `config` fails validation.
    pub fn new(config: PoolConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Builds a pool from an already validated config.
    fn build(config: PoolConfig) -> Self {
        tracing::debug!(
            start_size = config.start_size(),
            pooled_size = config.pooled_size(),
            max_size = config.max_size(),
            "created chunk pool"
        );
        Self {
            registry: Arc::new(ArcSwap::from_pointee(Registry::new(config))),
        }
    }

    /// Returns the process-wide pool used by [`ChunkedBuffer::new`](crate::ChunkedBuffer::new).
    ///
    /// It starts with [`PoolConfig::default`]; call [`Pool::configure`] on
    /// it before serialization starts to change the strategy.
    pub fn global() -> &'static Pool {
        &GLOBAL_POOL
    }

    /// Replaces the configuration and rebuilds every free list.
    ///
    /// Previously pooled chunks are discarded. Buffers that are still
    /// writing keep working; chunks they return that no longer match a
    /// size class are dropped. Concurrent calls resolve last-writer-wins.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`](crate::PoolError::InvalidConfig)
    /// and leaves the pool untouched if `config` fails validation.
    pub fn configure(&self, config: PoolConfig) -> Result<()> {
        config.validate()?;
        tracing::debug!(
            start_size = config.start_size(),
            pooled_size = config.pooled_size(),
            max_size = config.max_size(),
            "reconfigured chunk pool"
        );
        self.registry.store(Arc::new(Registry::new(config)));
        Ok(())
    }

    /// Returns the active configuration.
    pub fn config(&self) -> PoolConfig {
        *self.registry.load().config()
    }

    /// Returns an empty chunk with capacity exactly `size`.
    ///
    /// Sizes below `pooled_size` are always freshly allocated. Larger
    /// sizes are served from the matching free list when it has an idle
    /// chunk, and freshly allocated otherwise.
    pub fn acquire(&self, size: usize) -> Chunk {
        let registry = self.registry.load();
        if size >= registry.config().pooled_size() {
            if let Some(chunk) = registry.pop(size) {
                return chunk;
            }
        }
        tracing::trace!(size, "allocating fresh chunk");
        Chunk::alloc(size)
    }

    /// Takes ownership of `chunk` and pools it if its capacity is a
    /// registered size class. Anything else is dropped.
    pub fn release(&self, chunk: Chunk) {
        let registry = self.registry.load();
        if chunk.capacity() < registry.config().pooled_size() {
            return;
        }
        if let Err(chunk) = registry.push(chunk) {
            tracing::trace!(capacity = chunk.capacity(), "dropping unpooled chunk");
        }
    }

    /// Returns the number of idle chunks pooled for `size`.
    ///
    /// Zero when `size` is not a registered size class.
    pub fn pooled_count(&self, size: usize) -> usize {
        self.registry.load().idle(size)
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::build(PoolConfig::default())
    }
}

impl fmt::Debug for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("config", &self.config())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PoolError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing::span;

    #[test]
    fn test_acquire_fresh() {
        let pool = Pool::default();
        let chunk = pool.acquire(2048);
        assert_eq!(chunk.capacity(), 2048);
        assert!(chunk.is_empty());
    }

    #[test]
    fn test_release_and_reuse() {
        let pool = Pool::default();
        let mut chunk = pool.acquire(512);
        chunk.push_slice(b"previous run");
        pool.release(chunk);
        assert_eq!(pool.pooled_count(512), 1);

        let chunk = pool.acquire(512);
        assert!(chunk.is_empty());
        assert_eq!(chunk.capacity(), 512);
        assert_eq!(pool.pooled_count(512), 0);
    }

    #[test]
    fn test_small_chunks_bypass_pool() {
        let pool = Pool::default();
        pool.release(pool.acquire(128));
        pool.release(pool.acquire(256));
        assert_eq!(pool.pooled_count(128), 0);
        assert_eq!(pool.pooled_count(256), 0);
    }

    #[test]
    fn test_oversized_and_irregular_dropped() {
        let pool = Pool::default();
        pool.release(pool.acquire(65536));
        pool.release(pool.acquire(1000));
        assert_eq!(pool.pooled_count(65536), 0);
        assert_eq!(pool.pooled_count(1000), 0);
    }

    #[test]
    fn test_configure_discards_pooled() {
        let pool = Pool::default();
        pool.release(pool.acquire(1024));
        assert_eq!(pool.pooled_count(1024), 1);

        pool.configure(PoolConfig::new(2048, 2048, 32768).unwrap())
            .unwrap();
        assert_eq!(pool.pooled_count(1024), 0);
        assert_eq!(pool.config().start_size(), 2048);
    }

    #[test]
    fn test_stale_chunk_dropped_after_configure() {
        let pool = Pool::default();
        let stale = pool.acquire(1024);
        pool.configure(PoolConfig::new(2048, 2048, 32768).unwrap())
            .unwrap();

        pool.release(stale);
        assert_eq!(pool.pooled_count(1024), 0);
    }

    #[test]
    fn test_configure_rejects_invalid() {
        let pool = Pool::default();
        let bad = PoolConfig::default().with_start_size(4096);
        assert!(matches!(
            pool.configure(bad),
            Err(PoolError::InvalidConfig { .. })
        ));
        assert_eq!(pool.config(), PoolConfig::default());
    }

    #[test]
    fn test_new_rejects_invalid() {
        assert!(Pool::new(PoolConfig::default().with_max_size(3)).is_err());
    }

    struct DebugEvents(Arc<AtomicUsize>);

    impl tracing::Subscriber for DebugEvents {
        fn enabled(&self, _: &tracing::Metadata<'_>) -> bool {
            true
        }
        fn new_span(&self, _: &span::Attributes<'_>) -> span::Id {
            span::Id::from_u64(1)
        }
        fn record(&self, _: &span::Id, _: &span::Record<'_>) {}
        fn record_follows_from(&self, _: &span::Id, _: &span::Id) {}
        fn event(&self, event: &tracing::Event<'_>) {
            if *event.metadata().level() == tracing::Level::DEBUG {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
        fn enter(&self, _: &span::Id) {}
        fn exit(&self, _: &span::Id) {}
    }

    fn debug_events(f: impl FnOnce()) -> usize {
        let count = Arc::new(AtomicUsize::new(0));
        tracing::subscriber::with_default(DebugEvents(count.clone()), f);
        count.load(Ordering::SeqCst)
    }

    #[test]
    fn test_creation_logged_by_every_constructor() {
        assert_eq!(debug_events(|| drop(Pool::default())), 1);
        assert_eq!(
            debug_events(|| drop(Pool::new(PoolConfig::default()).unwrap())),
            1
        );
        assert_eq!(
            debug_events(|| {
                let _ = Pool::new(PoolConfig::default().with_max_size(3));
            }),
            0,
            "rejected config creates nothing"
        );
    }

    #[test]
    fn test_clones_share_free_lists() {
        let pool = Pool::default();
        let other = pool.clone();
        other.release(other.acquire(4096));
        assert_eq!(pool.pooled_count(4096), 1);
    }

    #[test]
    fn test_concurrent_acquire_release() {
        let pool = Pool::default();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let pool = pool.clone();
                std::thread::spawn(move || {
                    for i in 0..1000 {
                        let size = 512 << (i % 4);
                        let mut chunk = pool.acquire(size);
                        assert!(chunk.is_empty());
                        assert_eq!(chunk.capacity(), size);
                        chunk.push_slice(b"payload");
                        pool.release(chunk);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        // At most one idle chunk per thread per class.
        for size in [512, 1024, 2048, 4096] {
            assert!(pool.pooled_count(size) <= 8);
            assert!(pool.pooled_count(size) >= 1);
        }
    }
}
