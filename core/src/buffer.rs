//! Growable byte buffer with token cursors.
//!
//! Cursors are plain offsets into `bytes`, never references, so they survive
//! reallocation untouched and only need rebasing when data moves during
//! compaction.

use crate::Error;

/// Owned input bytes plus the token-start and scan cursors.
///
/// `bytes.len()` is the content end. Invariant:
/// `token_start <= scan_pos <= bytes.len() <= bytes.capacity()`.
#[derive(Debug, Clone, Default)]
pub(crate) struct SourceBuffer {
    bytes: Vec<u8>,
    token_start: usize,
    scan_pos: usize,
}

impl SourceBuffer {
    /// Empty buffer with room for exactly `capacity` bytes.
    pub(crate) fn try_with_capacity(capacity: usize) -> Result<Self, Error> {
        let mut buf = Self::default();
        buf.reserve_total(capacity)?;
        Ok(buf)
    }

    /// Offset one past the last valid byte.
    #[inline]
    pub(crate) fn content_end(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    #[inline]
    pub(crate) fn token_start(&self) -> usize {
        self.token_start
    }

    #[inline]
    pub(crate) fn scan_pos(&self) -> usize {
        self.scan_pos
    }

    /// Bytes not yet emitted as part of a token or skipped as whitespace.
    #[inline]
    pub(crate) fn unconsumed(&self) -> usize {
        self.bytes.len() - self.token_start
    }

    /// Every byte still held, consumed prefix included.
    #[inline]
    pub(crate) fn contents(&self) -> &[u8] {
        &self.bytes
    }

    /// Bytes of the token being scanned, `[token_start, scan_pos)`.
    #[inline]
    pub(crate) fn pending(&self) -> &[u8] {
        &self.bytes[self.token_start..self.scan_pos]
    }

    #[inline]
    pub(crate) fn at_end(&self) -> bool {
        self.scan_pos >= self.bytes.len()
    }

    #[inline]
    pub(crate) fn is_between_tokens(&self) -> bool {
        self.token_start == self.scan_pos
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.bytes.get(self.scan_pos).copied()
    }

    /// Moves the scan cursor past the byte under it.
    #[inline]
    pub(crate) fn bump(&mut self) {
        debug_assert!(self.scan_pos < self.bytes.len());
        self.scan_pos += 1;
    }

    /// Marks everything up to the scan cursor as consumed.
    #[inline]
    pub(crate) fn commit(&mut self) {
        self.token_start = self.scan_pos;
    }

    /// Ends the current token at the scan cursor and returns its bytes.
    pub(crate) fn take_token(&mut self) -> &[u8] {
        let start = self.token_start;
        self.token_start = self.scan_pos;
        &self.bytes[start..self.scan_pos]
    }

    /// Shifts `[token_start, content_end)` to offset 0.
    ///
    /// Returns the number of bytes reclaimed.
    pub(crate) fn compact(&mut self) -> usize {
        let consumed = self.token_start;
        if consumed > 0 {
            self.bytes.drain(..consumed);
            self.scan_pos -= consumed;
            self.token_start = 0;
        }
        consumed
    }

    /// Ensures the buffer can hold `required` bytes in total.
    ///
    /// Grows to exactly `required`; a buffer that is already large enough is
    /// left alone.
    pub(crate) fn reserve_total(&mut self, required: usize) -> Result<(), Error> {
        if required <= self.bytes.capacity() {
            return Ok(());
        }
        self.bytes
            .try_reserve_exact(required - self.bytes.len())
            .map_err(|_| Error::OutOfMemory { requested: required })
    }

    #[inline]
    pub(crate) fn append(&mut self, chunk: &[u8]) {
        self.bytes.extend_from_slice(chunk);
    }

    pub(crate) fn clear(&mut self) {
        self.bytes.clear();
        self.token_start = 0;
        self.scan_pos = 0;
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.compact();
        self.bytes.shrink_to_fit();
    }
}
