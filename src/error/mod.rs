//! Error types for chunkbuf.
//!
//! Writes never fail. The only recoverable error is a rejected
//! [`PoolConfig`](crate::PoolConfig), reported when the configuration is
//! built or installed rather than surfacing later as silent pooling misses.

/// Errors that can occur while configuring a pool.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PoolError>;
