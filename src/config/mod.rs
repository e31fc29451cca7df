//! Configuration for chunk allocation and reuse.
//!
//! [`PoolConfig`] controls three things:
//!
//! - how large the first chunk of a fresh buffer is (`start_size`)
//! - from which capacity on chunks are worth pooling (`pooled_size`)
//! - where geometric growth stops (`max_size`)
//!
//! # Example
//!
//! ```
//! use chunkbuf::PoolConfig;
//!
//! // Custom bounds
//! let config = PoolConfig::new(2048, 2048, 32768)?;
//! assert_eq!(config.size_classes().count(), 5);
//!
//! // Builder pattern, validated explicitly
//! let config = PoolConfig::default().with_start_size(256);
//! config.validate()?;
//! # Ok::<(), chunkbuf::PoolError>(())
//! ```

use crate::error::{PoolError, Result};

/// Default capacity of the first chunk of a buffer (128 B).
pub const DEFAULT_START_SIZE: usize = 128;

/// Default minimum capacity eligible for pooling (512 B).
pub const DEFAULT_POOLED_SIZE: usize = 512;

/// Default growth ceiling (32 KiB).
pub const DEFAULT_MAX_SIZE: usize = 32 * 1024;

/// Allocation and reuse strategy for chunked buffers.
///
/// # Size Constraints
///
/// All sizes must be:
/// - Non-zero
/// - Powers of 2 (the pool is keyed by exact capacity)
/// - Ordered: `start_size <= pooled_size <= max_size`
///
/// Chunks smaller than `pooled_size` are always allocated fresh and never
/// returned to the pool: for small, short-lived chunks the pool's
/// bookkeeping costs more than the allocation it saves.
///
/// # Example
///
/// ```
/// use chunkbuf::PoolConfig;
///
/// let config = PoolConfig::default();
/// assert_eq!(config.start_size(), 128);
/// assert_eq!(config.pooled_size(), 512);
/// assert_eq!(config.max_size(), 32768);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolConfig {
    /// Capacity of the first chunk handed to an empty buffer.
    start_size: usize,

    /// Minimum capacity that is pooled on release.
    pooled_size: usize,

    /// Largest capacity the growth policy will request.
    max_size: usize,
}

impl PoolConfig {
    /// Creates a new configuration with the specified bounds.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if:
    /// - Any size is zero
    /// - `start_size > pooled_size` or `pooled_size > max_size`
    /// - Sizes are not powers of 2
    ///
    /// # Example
    ///
    /// ```
    /// use chunkbuf::PoolConfig;
    ///
    /// assert!(PoolConfig::new(128, 512, 32768).is_ok());
    /// assert!(PoolConfig::new(1024, 512, 32768).is_err());
    /// assert!(PoolConfig::new(128, 500, 32768).is_err());
    /// ```
    pub fn new(start_size: usize, pooled_size: usize, max_size: usize) -> Result<Self> {
        if start_size == 0 || pooled_size == 0 || max_size == 0 {
            return Err(PoolError::InvalidConfig {
                message: "chunk sizes must be non-zero",
            });
        }

        if start_size > pooled_size {
            return Err(PoolError::InvalidConfig {
                message: "start_size cannot be greater than pooled_size",
            });
        }

        if pooled_size > max_size {
            return Err(PoolError::InvalidConfig {
                message: "pooled_size cannot be greater than max_size",
            });
        }

        if !start_size.is_power_of_two()
            || !pooled_size.is_power_of_two()
            || !max_size.is_power_of_two()
        {
            return Err(PoolError::InvalidConfig {
                message: "chunk sizes must be powers of 2",
            });
        }

        Ok(Self {
            start_size,
            pooled_size,
            max_size,
        })
    }

    /// Sets the first chunk capacity.
    ///
    /// Note: This does not validate the configuration. Use [`PoolConfig::validate`]
    /// to check if the configuration is valid.
    pub fn with_start_size(mut self, size: usize) -> Self {
        self.start_size = size;
        self
    }

    /// Sets the minimum pooled capacity.
    ///
    /// Note: This does not validate the configuration.
    pub fn with_pooled_size(mut self, size: usize) -> Self {
        self.pooled_size = size;
        self
    }

    /// Sets the growth ceiling.
    ///
    /// Note: This does not validate the configuration.
    pub fn with_max_size(mut self, size: usize) -> Self {
        self.max_size = size;
        self
    }

    /// Returns the first chunk capacity.
    pub fn start_size(&self) -> usize {
        self.start_size
    }

    /// Returns the minimum pooled capacity.
    pub fn pooled_size(&self) -> usize {
        self.pooled_size
    }

    /// Returns the growth ceiling.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Validates the current configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use chunkbuf::PoolConfig;
    ///
    /// let config = PoolConfig::default().with_pooled_size(64);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        Self::new(self.start_size, self.pooled_size, self.max_size).map(|_| ())
    }

    /// Iterates the pooled capacities, smallest first.
    ///
    /// Every power of two in `[pooled_size, max_size]` gets its own
    /// free list. On an unvalidated config the iterator may be empty.
    pub fn size_classes(&self) -> impl Iterator<Item = usize> + use<> {
        let max = self.max_size;
        std::iter::successors(Some(self.pooled_size).filter(|s| *s > 0), |s| {
            s.checked_mul(2)
        })
        .take_while(move |s| *s <= max)
    }

    /// Capacity of the chunk that follows one of `previous` capacity.
    ///
    /// Doubles `previous` and clamps to `max_size`. Chunks that were
    /// already larger than the ceiling (oversized single writes) fall back
    /// to the ceiling too.
    pub(crate) fn next_chunk_size(&self, previous: usize) -> usize {
        previous.saturating_mul(2).min(self.max_size)
    }

    /// Capacity to request so that at least `needed` bytes fit.
    ///
    /// `growth` is the size the growth policy would pick on its own. Up to
    /// `max_size` the request is rounded to a power of two so it still
    /// lands in a size class; above `max_size` it is exactly `needed`.
    pub(crate) fn chunk_size_for(&self, growth: usize, needed: usize) -> usize {
        if needed > self.max_size {
            needed
        } else {
            growth.max(needed.next_power_of_two())
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            start_size: DEFAULT_START_SIZE,
            pooled_size: DEFAULT_POOLED_SIZE,
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}
