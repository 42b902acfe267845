//! Async streaming support.
//!
//! This module drives a [`Tokenizer`] from asynchronous sources: chunks that
//! arrive over a channel, an [`AsyncRead`](::tokio::io::AsyncRead), or a
//! [`Stream`](futures_core::Stream). The tokenizer itself stays synchronous;
//! the adapters own it and hand out [`OwnedToken`]s, since borrowed
//! [`Token`](crate::Token) views cannot cross an `.await`.
//!
//! # Architecture
//!
//! - **Source** feeds byte chunks to **AsyncTokenizer** (tokenizer + sender)
//! - **AsyncTokenizer** sends owned tokens to the **Consumer** over an mpsc channel
//! - at end of input, `finish` flushes the final token
//!
//! # Example
//!
//! ```ignore
//! use lexi::async_stream::{StreamConfig, tokio_impl::tokenize_reader};
//!
//! async fn print_tokens(file: tokio::fs::File) -> Result<(), StreamError> {
//!     let (tx, mut rx) = tokio::sync::mpsc::channel(256);
//!
//!     tokio::spawn(async move {
//!         tokenize_reader(file, tx, StreamConfig::default()).await
//!     });
//!
//!     while let Some(token) = rx.recv().await {
//!         println!("{}", token);
//!     }
//!     Ok(())
//! }
//! ```

#[cfg(feature = "futures")]
use crate::OwnedToken;
use crate::{Error, TokenizerConfig};
use thiserror::Error as ThisError;

/// Error type for async streaming operations.
#[derive(ThisError, Debug)]
pub enum StreamError {
    /// The token receiver was dropped.
    #[error("channel closed unexpectedly")]
    ChannelClosed,
    /// Input chunk exceeded maximum allowed size.
    #[error("chunk size {size} exceeds maximum {max}")]
    ChunkTooLarge {
        /// Size of the chunk that was rejected.
        size: usize,
        /// Maximum allowed chunk size.
        max: usize,
    },
    /// The tokenizer rejected a chunk.
    #[error(transparent)]
    Tokenizer(#[from] Error),
    /// Reading from the source failed.
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration for async stream processing.
///
/// # Presets
///
/// - [`StreamConfig::small()`]: low memory, small inputs (<1KB)
/// - [`StreamConfig::medium()`]: balanced (default)
/// - [`StreamConfig::large()`]: high throughput, large inputs (>64KB)
/// - [`StreamConfig::from_chunk_size()`]: derived from the expected chunk size
#[derive(Debug, Clone, Copy)]
pub struct StreamConfig {
    /// Suggested capacity of the token channel.
    ///
    /// The adapters do not create channels themselves; callers use this when
    /// building one. Default: 256.
    pub channel_capacity: usize,
    /// Largest chunk accepted by `feed`.
    ///
    /// Larger chunks fail with [`StreamError::ChunkTooLarge`]. Default: 64KB.
    pub max_chunk_size: usize,
    /// Bytes requested per read by `tokenize_reader`. Default: 4KB.
    pub read_chunk_size: usize,
    /// Configuration of the underlying tokenizer.
    pub tokenizer: TokenizerConfig,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self::medium()
    }
}

impl StreamConfig {
    /// Configuration optimized for small inputs (<1KB).
    pub const fn small() -> Self {
        Self {
            channel_capacity: 32,
            max_chunk_size: 4 * 1024,
            read_chunk_size: 256,
            tokenizer: TokenizerConfig::new().with_initial_capacity(256),
        }
    }

    /// Configuration optimized for medium inputs (1KB-64KB).
    pub const fn medium() -> Self {
        Self {
            channel_capacity: 256,
            max_chunk_size: 64 * 1024,
            read_chunk_size: 4096,
            tokenizer: TokenizerConfig::new().with_initial_capacity(4096),
        }
    }

    /// Configuration optimized for large inputs (>64KB).
    pub const fn large() -> Self {
        Self {
            channel_capacity: 2048,
            max_chunk_size: 256 * 1024,
            read_chunk_size: 65536,
            tokenizer: TokenizerConfig::new().with_initial_capacity(65536),
        }
    }

    /// Create configuration from expected chunk size.
    ///
    /// Estimates tokens as ~1 token per 4 bytes.
    pub const fn from_chunk_size(chunk_size: usize) -> Self {
        Self {
            channel_capacity: chunk_size / 4 + 1,
            max_chunk_size: chunk_size.saturating_mul(2),
            read_chunk_size: chunk_size,
            tokenizer: TokenizerConfig::new().with_initial_capacity(chunk_size),
        }
    }
}

#[cfg(feature = "tokio")]
pub mod tokio_impl {
    //! Tokio-based async tokenizer.

    use super::*;
    use crate::Tokenizer;
    use ::tokio::io::{AsyncRead, AsyncReadExt};
    use ::tokio::sync::mpsc;

    /// Tokenizer that receives chunks and sends tokens down a channel.
    pub struct AsyncTokenizer {
        tokenizer: Tokenizer,
        token_tx: mpsc::Sender<crate::OwnedToken>,
        config: StreamConfig,
    }

    impl AsyncTokenizer {
        /// Create a new async tokenizer with default configuration.
        pub fn new(token_tx: mpsc::Sender<crate::OwnedToken>) -> Self {
            Self::with_config(token_tx, StreamConfig::default())
        }

        /// Create a new async tokenizer with custom configuration.
        pub fn with_config(token_tx: mpsc::Sender<crate::OwnedToken>, config: StreamConfig) -> Self {
            Self {
                tokenizer: Tokenizer::with_config(config.tokenizer),
                token_tx,
                config,
            }
        }

        /// Feed a chunk and send every token it completes.
        pub async fn feed(&mut self, chunk: &[u8]) -> Result<(), StreamError> {
            if chunk.len() > self.config.max_chunk_size {
                return Err(StreamError::ChunkTooLarge {
                    size: chunk.len(),
                    max: self.config.max_chunk_size,
                });
            }

            self.tokenizer.feed(chunk)?;

            while let Some(token) = self.tokenizer.next_token().map(|t| t.to_owned_token()) {
                self.token_tx
                    .send(token)
                    .await
                    .map_err(|_| StreamError::ChannelClosed)?;
            }

            Ok(())
        }

        /// Signal that no more input will arrive and send the final token.
        pub async fn finish(mut self) -> Result<(), StreamError> {
            while let Some(token) = self.tokenizer.flush().map(|t| t.to_owned_token()) {
                self.token_tx
                    .send(token)
                    .await
                    .map_err(|_| StreamError::ChannelClosed)?;
            }

            Ok(())
        }

        /// Unconsumed bytes held by the underlying tokenizer.
        pub fn buffered_len(&self) -> usize {
            self.tokenizer.buffered_len()
        }
    }

    /// Tokenize everything `reader` yields, sending tokens to `token_tx`.
    ///
    /// Reads `config.read_chunk_size` bytes at a time and flushes at EOF.
    /// Returns the number of bytes read.
    pub async fn tokenize_reader<R>(
        mut reader: R,
        token_tx: mpsc::Sender<crate::OwnedToken>,
        config: StreamConfig,
    ) -> Result<u64, StreamError>
    where
        R: AsyncRead + Unpin,
    {
        let len = config.read_chunk_size.max(1);
        let mut chunk = Vec::new();
        chunk
            .try_reserve_exact(len)
            .map_err(|_| Error::OutOfMemory { requested: len })?;
        chunk.resize(len, 0);
        let mut tokenizer = AsyncTokenizer::with_config(token_tx, config);
        let mut total = 0u64;

        loop {
            let n = reader.read(&mut chunk).await?;
            if n == 0 {
                break;
            }
            total += n as u64;
            tokenizer.feed(&chunk[..n]).await?;
        }

        tracing::debug!(bytes = total, "reader exhausted, flushing tokenizer");
        tokenizer.finish().await?;
        Ok(total)
    }
}

#[cfg(feature = "futures")]
pub mod futures_impl {
    //! Futures-based token stream (runtime-agnostic).

    use super::*;
    use crate::Tokenizer;
    use core::pin::Pin;
    use core::task::{Context, Poll};
    use futures_core::Stream;

    /// A stream adapter that turns a stream of byte chunks into tokens.
    ///
    /// The final token is flushed when the inner stream ends. A tokenizer
    /// error is yielded once and ends the stream.
    pub struct TokenStream<S> {
        inner: S,
        tokenizer: Tokenizer,
        finished: bool,
        done: bool,
    }

    impl<S> TokenStream<S> {
        /// Create a new token stream wrapping a chunk stream.
        pub fn new(inner: S) -> Self {
            Self::with_config(inner, TokenizerConfig::default())
        }

        /// Create a new token stream with a configured tokenizer.
        pub fn with_config(inner: S, config: TokenizerConfig) -> Self {
            Self {
                inner,
                tokenizer: Tokenizer::with_config(config),
                finished: false,
                done: false,
            }
        }

        /// The wrapped tokenizer.
        pub fn tokenizer(&self) -> &Tokenizer {
            &self.tokenizer
        }
    }

    impl<S, B> Stream for TokenStream<S>
    where
        S: Stream<Item = B> + Unpin,
        B: AsRef<[u8]>,
    {
        type Item = Result<OwnedToken, StreamError>;

        fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
            let this = self.get_mut();
            if this.done {
                return Poll::Ready(None);
            }

            loop {
                if this.finished {
                    let token = this.tokenizer.flush().map(|t| t.to_owned_token());
                    if token.is_none() {
                        this.done = true;
                    }
                    return Poll::Ready(token.map(Ok));
                }

                if let Some(token) = this.tokenizer.next_token() {
                    return Poll::Ready(Some(Ok(token.to_owned_token())));
                }

                match Pin::new(&mut this.inner).poll_next(cx) {
                    Poll::Ready(Some(chunk)) => {
                        if let Err(err) = this.tokenizer.feed(chunk.as_ref()) {
                            this.done = true;
                            return Poll::Ready(Some(Err(err.into())));
                        }
                    }
                    Poll::Ready(None) => {
                        this.finished = true;
                    }
                    Poll::Pending => {
                        return Poll::Pending;
                    }
                }
            }
        }
    }
}
