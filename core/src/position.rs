use core::fmt;

/// A line/column location in the input.
///
/// Lines are 1-based, columns are 0-based and count bytes, not characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// 1-based line number.
    pub line: usize,
    /// 0-based byte column within the line.
    pub column: usize,
}

impl Position {
    /// Position of the first byte of the input.
    pub const START: Self = Self { line: 1, column: 0 };

    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Moves past `byte`.
    ///
    /// A newline starts the next line at column 0; every other byte moves one
    /// column to the right.
    #[inline]
    pub fn advance(&mut self, byte: u8) {
        if byte == b'\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Position {
    #[inline]
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
