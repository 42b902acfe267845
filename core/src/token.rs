//! Token views and owned token copies.

use crate::Position;
use core::fmt;

/// A token borrowed from a [`Tokenizer`](crate::Tokenizer) buffer.
///
/// The borrow lasts until the next call that takes the tokenizer mutably, so
/// the compiler rejects any use of a token after a later `feed` or
/// `next_token`, both of which may move the underlying bytes. Use
/// [`Token::to_owned_token`] to keep a token around.
///
/// ```compile_fail
/// use lexi_core::Tokenizer;
///
/// let mut tokenizer = Tokenizer::new();
/// tokenizer.feed(b"one two ").unwrap();
/// let first = tokenizer.next_token().unwrap();
/// tokenizer.feed(b"three ").unwrap();
/// println!("{}", first);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<'a> {
    bytes: &'a [u8],
    position: Position,
}

impl<'a> Token<'a> {
    #[inline]
    pub(crate) const fn new(bytes: &'a [u8], position: Position) -> Self {
        Self { bytes, position }
    }

    /// Length of the token in bytes. Never zero.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// The raw token bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// The token as UTF-8, if it is valid UTF-8.
    #[inline]
    pub fn as_str(&self) -> Option<&'a str> {
        core::str::from_utf8(self.bytes).ok()
    }

    /// Line of the first byte (1-based).
    #[inline]
    pub const fn line(&self) -> usize {
        self.position.line
    }

    /// Column of the first byte (0-based).
    #[inline]
    pub const fn column(&self) -> usize {
        self.position.column
    }

    #[inline]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Copies the token out of the tokenizer buffer.
    pub fn to_owned_token(&self) -> OwnedToken {
        OwnedToken {
            bytes: self.bytes.to_vec(),
            position: self.position,
        }
    }
}

/// Renders `(len line:column) text`, replacing invalid UTF-8 with U+FFFD.
impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({} {}) {}",
            self.len(),
            self.position,
            String::from_utf8_lossy(self.bytes)
        )
    }
}

/// A token that owns its bytes.
///
/// Produced by [`Token::to_owned_token`] and
/// [`Tokenizer::owned_tokens`](crate::Tokenizer::owned_tokens), and the item
/// type of the async adapters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OwnedToken {
    /// Token bytes.
    pub bytes: Vec<u8>,
    /// Position of the first byte.
    pub position: Position,
}

impl OwnedToken {
    /// Length of the token in bytes.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Borrows this token as a [`Token`] view.
    #[inline]
    pub fn as_token(&self) -> Token<'_> {
        Token::new(&self.bytes, self.position)
    }
}

impl fmt::Display for OwnedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_token(), f)
    }
}

impl From<Token<'_>> for OwnedToken {
    #[inline]
    fn from(token: Token<'_>) -> Self {
        token.to_owned_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_accessors() {
        let tok = Token::new(b"hello", Position::new(3, 4));
        assert_eq!(tok.len(), 5);
        assert_eq!(tok.as_bytes(), b"hello");
        assert_eq!(tok.as_str(), Some("hello"));
        assert_eq!(tok.line(), 3);
        assert_eq!(tok.column(), 4);
    }

    #[test]
    fn test_token_display() {
        let tok = Token::new(b"ef", Position::new(2, 3));
        assert_eq!(tok.to_string(), "(2 2:3) ef");
    }

    #[test]
    fn test_token_display_invalid_utf8() {
        let tok = Token::new(b"a\xffb", Position::START);
        assert_eq!(tok.as_str(), None);
        assert_eq!(tok.to_string(), "(3 1:0) a\u{fffd}b");
    }

    #[test]
    fn test_owned_token_matches_view() {
        let tok = Token::new(b"xyz", Position::new(1, 9));
        let owned = OwnedToken::from(tok);
        assert_eq!(owned.len(), 3);
        assert_eq!(owned.as_token(), tok);
        assert_eq!(owned.to_string(), tok.to_string());
    }
}
