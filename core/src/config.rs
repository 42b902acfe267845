//! Tokenizer configuration for buffer sizing and resource limits.
//!
//! This module provides [`TokenizerConfig`] for controlling how the token
//! buffer is allocated and how large it may grow.
//!
//! # Buffer Limits
//!
//! The tokenizer only retains bytes that have not been tokenized yet, so the
//! buffer is normally no larger than the longest token plus one chunk. A
//! stream containing a single enormous token (for example a multi-gigabyte
//! run without whitespace) would still grow it without bound. Set
//! `max_buffered_len` when tokenizing untrusted input.
//!
//! # Example
//!
//! ```
//! use lexi_core::TokenizerConfig;
//!
//! // No pre-allocation, no limit
//! let config = TokenizerConfig::default();
//!
//! // Pre-allocate for 4 KiB reads and cap the buffer at 1 MiB
//! let config = TokenizerConfig::new()
//!     .with_initial_capacity(4096)
//!     .with_max_buffered_len(1024 * 1024);
//! assert_eq!(config.initial_capacity, 4096);
//! ```

/// Configuration for tokenizer buffering.
///
/// # Default Values
///
/// | Setting | Default | Rationale |
/// |---------|---------|-----------|
/// | `initial_capacity` | 0 | Allocate lazily on the first feed |
/// | `max_buffered_len` | `usize::MAX` | No limit by default |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct TokenizerConfig {
    /// Bytes to allocate when the tokenizer is created.
    ///
    /// Growth past this capacity is exact: the buffer is resized to precisely
    /// the number of bytes that must be held, never more.
    ///
    /// Default: 0
    pub initial_capacity: usize,

    /// Maximum number of unconsumed bytes the tokenizer may hold.
    ///
    /// A feed that would exceed this fails with
    /// [`Error::BufferLimitExceeded`](crate::Error::BufferLimitExceeded).
    ///
    /// Default: `usize::MAX` (no limit)
    pub max_buffered_len: usize,
}

impl Default for TokenizerConfig {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TokenizerConfig {
    /// Default configuration, usable in const contexts.
    pub const DEFAULT: Self = Self {
        initial_capacity: 0,
        max_buffered_len: usize::MAX,
    };

    /// Creates a new configuration with default values.
    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Sets the capacity allocated up front.
    #[inline]
    pub const fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the maximum number of buffered bytes.
    ///
    /// # Arguments
    ///
    /// * `len` - Maximum unconsumed bytes. Use `usize::MAX` to disable.
    #[inline]
    pub const fn with_max_buffered_len(mut self, len: usize) -> Self {
        self.max_buffered_len = len;
        self
    }

    /// Removes the buffer limit.
    ///
    /// # Warning
    ///
    /// Only use this for trusted input. A single token without whitespace is
    /// buffered in full until it ends.
    #[inline]
    pub const fn unlimited(self) -> Self {
        self.with_max_buffered_len(usize::MAX)
    }
}
