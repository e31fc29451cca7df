//! Size class registry: one lock-free free list per pooled capacity.

use crossbeam_queue::SegQueue;

use crate::chunk::Chunk;
use crate::config::PoolConfig;

/// Free list for one capacity.
struct SizeClass {
    size: usize,
    freelist: SegQueue<Chunk>,
}

/// Snapshot of the free lists built for one [`PoolConfig`].
///
/// Classes are stored smallest first, so the class for capacity `c` sits
/// at `log2(c) - log2(pooled_size)`.
pub(super) struct Registry {
    config: PoolConfig,
    classes: Vec<SizeClass>,
}

impl Registry {
    pub(super) fn new(config: PoolConfig) -> Self {
        let classes = config
            .size_classes()
            .map(|size| SizeClass {
                size,
                freelist: SegQueue::new(),
            })
            .collect();

        Self { config, classes }
    }

    pub(super) fn config(&self) -> &PoolConfig {
        &self.config
    }

    fn class(&self, capacity: usize) -> Option<&SizeClass> {
        if capacity < self.config.pooled_size() || !capacity.is_power_of_two() {
            return None;
        }
        let index = (capacity.trailing_zeros() - self.config.pooled_size().trailing_zeros()) as usize;
        self.classes.get(index).filter(|class| class.size == capacity)
    }

    /// Pops an idle chunk of exactly `capacity`, if one is pooled.
    pub(super) fn pop(&self, capacity: usize) -> Option<Chunk> {
        self.class(capacity)?.freelist.pop()
    }

    /// Pushes `chunk` onto its class. Gives the chunk back if no class matches.
    pub(super) fn push(&self, mut chunk: Chunk) -> Result<(), Chunk> {
        match self.class(chunk.capacity()) {
            Some(class) => {
                chunk.clear();
                class.freelist.push(chunk);
                Ok(())
            }
            None => Err(chunk),
        }
    }

    pub(super) fn idle(&self, capacity: usize) -> usize {
        self.class(capacity).map_or(0, |class| class.freelist.len())
    }
}
