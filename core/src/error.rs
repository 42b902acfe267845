//! Core error types for lexi.
//!
//! Only [`Tokenizer::feed`](crate::Tokenizer::feed) can fail. Pulling tokens
//! never errors: every byte sequence is valid input, tokens are just maximal
//! runs of non-whitespace bytes.
//!
//! Drivers that want the reference behaviour of terminating the process on
//! allocation failure can match on [`Error::OutOfMemory`] and exit; the
//! tokenizer itself always hands the error back and stays usable.

use thiserror::Error;

/// Core lexi error type.
///
/// Both variants leave the tokenizer in a consistent state: the chunk that
/// triggered the error was not appended, and every previously buffered byte is
/// still available to [`Tokenizer::next_token`](crate::Tokenizer::next_token).
///
/// # Example
///
/// ```
/// use lexi_core::{Error, Tokenizer, TokenizerConfig};
///
/// let mut tokenizer = Tokenizer::with_config(TokenizerConfig::new().with_max_buffered_len(4));
/// tokenizer.feed(b"ab").unwrap();
///
/// let err = tokenizer.feed(b"cde").unwrap_err();
/// assert_eq!(err, Error::BufferLimitExceeded { requested: 5, limit: 4 });
/// assert_eq!(tokenizer.buffered_len(), 2);
/// ```
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The buffer could not grow to hold the unconsumed bytes plus the new chunk.
    ///
    /// `requested` is the total buffer length that was needed.
    #[error("out of memory: failed to grow token buffer to {requested} bytes")]
    OutOfMemory {
        /// Required buffer length in bytes.
        requested: usize,
    },

    /// Buffering the chunk would exceed
    /// [`TokenizerConfig::max_buffered_len`](crate::TokenizerConfig::max_buffered_len).
    ///
    /// This usually means a single token is larger than the configured cap,
    /// since everything before the current token is reclaimed on each feed.
    #[error("buffer limit exceeded: {requested} bytes > limit {limit}")]
    BufferLimitExceeded {
        /// Unconsumed bytes that would be buffered after the feed.
        requested: usize,
        /// Configured maximum.
        limit: usize,
    },
}
