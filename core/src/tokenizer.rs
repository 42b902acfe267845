//! The streaming tokenizer.
//!
//! [`Tokenizer`] accepts input in chunks of any size and yields whitespace
//! separated tokens with their line and column. Only bytes that have not been
//! tokenized yet are kept: every [`feed`](Tokenizer::feed) first discards the
//! consumed prefix of the buffer, so memory use is bounded by the longest
//! token plus the chunk size rather than by the total input size.
//!
//! # Example
//!
//! ```
//! use lexi_core::Tokenizer;
//!
//! let mut tokenizer = Tokenizer::new();
//! let mut seen = Vec::new();
//!
//! for chunk in [&b"ab\ncd e"[..], b"f"] {
//!     tokenizer.feed(chunk).unwrap();
//!     while let Some(tok) = tokenizer.next_token() {
//!         seen.push(tok.to_string());
//!     }
//! }
//! // "ef" runs to the end of the input, so it needs an explicit flush
//! while let Some(tok) = tokenizer.flush() {
//!     seen.push(tok.to_string());
//! }
//!
//! assert_eq!(seen, ["(2 1:0) ab", "(2 2:0) cd", "(2 2:3) ef"]);
//! ```

use crate::buffer::SourceBuffer;
use crate::{Error, OwnedToken, Position, Token, TokenizerConfig};
use core::fmt;

/// Returns true for the ASCII whitespace bytes that separate tokens.
///
/// Space, tab, newline, carriage return, vertical tab and form feed. Unlike
/// [`u8::is_ascii_whitespace`] this includes vertical tab (0x0B).
#[inline]
pub const fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

/// Where the tokenizer is between two calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// No token has been started; the next call skips whitespace first.
    BetweenTokens,
    /// A token was started but the input ran out before it ended.
    ScanningWord,
}

/// Incremental whitespace tokenizer.
///
/// See the [module documentation](crate::tokenizer) for the feeding protocol.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    buffer: SourceBuffer,
    /// Position of the next unread byte.
    position: Position,
    /// Position of the first byte of the token being scanned.
    token_position: Position,
    config: TokenizerConfig,
}

impl Tokenizer {
    /// Creates an empty tokenizer at line 1, column 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty tokenizer with the given configuration.
    ///
    /// If `initial_capacity` cannot be allocated the tokenizer starts with an
    /// empty buffer and allocates on the first [`feed`](Self::feed) instead.
    /// Use [`try_with_config`](Self::try_with_config) to see the failure.
    pub fn with_config(config: TokenizerConfig) -> Self {
        Self::try_with_config(config).unwrap_or_else(|err| {
            tracing::debug!(error = %err, "initial reservation failed, deferring to first feed");
            Self {
                config,
                ..Self::default()
            }
        })
    }

    /// Creates an empty tokenizer, reserving exactly `initial_capacity` bytes.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfMemory`] if the reservation fails.
    pub fn try_with_config(config: TokenizerConfig) -> Result<Self, Error> {
        Ok(Self {
            buffer: SourceBuffer::try_with_capacity(config.initial_capacity)?,
            position: Position::START,
            token_position: Position::START,
            config,
        })
    }

    #[inline]
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Appends a chunk of input.
    ///
    /// Already consumed bytes are dropped from the front of the buffer first.
    /// The buffer then grows, to exactly the size needed, only if the
    /// remaining bytes plus `chunk` do not fit. Feeding an empty chunk is
    /// allowed and only compacts.
    ///
    /// # Errors
    ///
    /// - [`Error::BufferLimitExceeded`] if the result would exceed
    ///   [`TokenizerConfig::max_buffered_len`]. Nothing is modified.
    /// - [`Error::OutOfMemory`] if the allocation fails. The buffer may have
    ///   been compacted, but no buffered byte is lost and `chunk` is not
    ///   appended.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<(), Error> {
        let retained = self.buffer.unconsumed();
        let required = required_len(retained, chunk.len())?;

        if required > self.config.max_buffered_len {
            tracing::debug!(
                requested = required,
                limit = self.config.max_buffered_len,
                "buffer limit exceeded"
            );
            return Err(Error::BufferLimitExceeded {
                requested: required,
                limit: self.config.max_buffered_len,
            });
        }

        let reclaimed = self.buffer.compact();
        if reclaimed > 0 {
            tracing::trace!(reclaimed, retained, "compacted token buffer");
        }

        let capacity = self.buffer.capacity();
        if let Err(err) = self.buffer.reserve_total(required) {
            tracing::debug!(requested = required, capacity, "token buffer growth failed");
            return Err(err);
        }
        if self.buffer.capacity() != capacity {
            tracing::trace!(
                from = capacity,
                to = self.buffer.capacity(),
                "grew token buffer"
            );
        }

        self.buffer.append(chunk);
        Ok(())
    }

    /// Returns the next complete token, if any.
    ///
    /// A token is complete once a whitespace byte follows it. A token that
    /// runs up to the end of the buffered input is held back, since the next
    /// chunk might continue it; feed a trailing whitespace byte or call
    /// [`flush`](Self::flush) at end of input.
    ///
    /// The returned token borrows the buffer and must be dropped (or copied
    /// with [`Token::to_owned_token`]) before the tokenizer is used again.
    pub fn next_token(&mut self) -> Option<Token<'_>> {
        self.scan(false)
    }

    /// Like [`next_token`](Self::next_token), but treats the end of the
    /// buffered input as the end of the stream.
    ///
    /// Call it in a loop once no more input will arrive. It yields the same
    /// tokens as feeding a trailing whitespace byte would.
    pub fn flush(&mut self) -> Option<Token<'_>> {
        self.scan(true)
    }

    fn scan(&mut self, at_eof: bool) -> Option<Token<'_>> {
        if self.buffer.is_between_tokens() {
            if !self.skip_whitespace() {
                return None;
            }
            self.token_position = self.position;
        }

        while let Some(byte) = self.buffer.peek() {
            if is_whitespace(byte) {
                break;
            }
            self.advance(byte);
        }

        if self.buffer.at_end() && !at_eof {
            return None;
        }

        let position = self.token_position;
        Some(Token::new(self.buffer.take_token(), position))
    }

    /// Skips whitespace, keeping the token start in step with the scan
    /// cursor. Returns false if the input ran out.
    fn skip_whitespace(&mut self) -> bool {
        while let Some(byte) = self.buffer.peek() {
            if !is_whitespace(byte) {
                return true;
            }
            self.advance(byte);
            self.buffer.commit();
        }
        false
    }

    #[inline]
    fn advance(&mut self, byte: u8) {
        self.buffer.bump();
        self.position.advance(byte);
    }

    /// Drains every currently complete token as an [`OwnedToken`].
    ///
    /// Stops where [`next_token`](Self::next_token) would return `None`.
    pub fn owned_tokens(&mut self) -> OwnedTokens<'_> {
        OwnedTokens { tokenizer: self }
    }

    /// Number of buffered bytes not yet emitted or skipped.
    #[inline]
    pub fn buffered_len(&self) -> usize {
        self.buffer.unconsumed()
    }

    /// Returns true if no unconsumed bytes are buffered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffered_len() == 0
    }

    /// Allocated buffer capacity in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Position of the next unread byte.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn state(&self) -> ScanState {
        if self.buffer.is_between_tokens() {
            ScanState::BetweenTokens
        } else {
            ScanState::ScanningWord
        }
    }

    /// Compacts the buffer and releases unused capacity.
    pub fn shrink_to_fit(&mut self) {
        self.buffer.shrink_to_fit();
    }

    /// Discards all buffered input and restarts at line 1, column 0.
    ///
    /// The allocation is kept for reuse.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.position = Position::START;
        self.token_position = Position::START;
    }

    /// Renders the buffer and cursor state for debugging.
    ///
    /// ```text
    /// [buf len: 8] ab cd ef
    /// [tok len: 2 start: 6 currn: 8] ef
    /// ```
    pub fn debug_dump(&self) -> DebugDump<'_> {
        DebugDump { tokenizer: self }
    }
}

/// Total bytes the buffer must hold to keep `retained` and append `incoming`.
///
/// A sum past `usize::MAX` can never be allocated, so it reports
/// [`Error::OutOfMemory`] rather than wrapping.
#[inline]
fn required_len(retained: usize, incoming: usize) -> Result<usize, Error> {
    retained.checked_add(incoming).ok_or(Error::OutOfMemory {
        requested: usize::MAX,
    })
}

/// Iterator returned by [`Tokenizer::owned_tokens`].
#[derive(Debug)]
pub struct OwnedTokens<'a> {
    tokenizer: &'a mut Tokenizer,
}

impl Iterator for OwnedTokens<'_> {
    type Item = OwnedToken;

    fn next(&mut self) -> Option<Self::Item> {
        self.tokenizer.next_token().map(|tok| tok.to_owned_token())
    }
}

/// Display adapter returned by [`Tokenizer::debug_dump`].
pub struct DebugDump<'a> {
    tokenizer: &'a Tokenizer,
}

impl fmt::Display for DebugDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let buffer = &self.tokenizer.buffer;
        let pending = buffer.pending();
        writeln!(
            f,
            "[buf len: {}] {}",
            buffer.content_end(),
            String::from_utf8_lossy(buffer.contents())
        )?;
        write!(
            f,
            "[tok len: {} start: {} currn: {}] {}",
            pending.len(),
            buffer.token_start(),
            buffer.scan_pos(),
            String::from_utf8_lossy(pending)
        )
    }
}
