#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! Token Printer
//!
//! The driver behind the `lexi-cat` binary: reads a byte stream in chunks,
//! feeds it to a [`Tokenizer`] and prints one line per token.
//!
//! # Format
//!
//! ```text
//! (length line:column) text
//! ```
//!
//! The token text is written as raw bytes, so invalid UTF-8 passes through
//! unchanged.

use lexi::{Token, Tokenizer, TokenizerConfig};
use std::io::{self, ErrorKind, Read, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Bytes requested per read.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Largest chunk size the binary accepts.
pub const MAX_CHUNK_SIZE: usize = 16 * 1024 * 1024;

/// Whitespace fed at end of input in [`FlushMode::Sentinel`].
pub const SENTINEL: &[u8] = b"\n ";

#[derive(Error, Debug)]
pub enum CatError {
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read error: {0}")]
    Read(#[source] io::Error),

    #[error("write error: {0}")]
    Write(#[source] io::Error),

    #[error(transparent)]
    Tokenize(#[from] lexi::Error),
}

impl CatError {
    /// True if the reader of our output went away, e.g. `lexi-cat | head`.
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, CatError::Write(e) if e.kind() == ErrorKind::BrokenPipe)
    }
}

/// How the last token is released at end of input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlushMode {
    /// Call [`Tokenizer::flush`].
    #[default]
    Explicit,
    /// Feed [`SENTINEL`] and pull tokens as usual.
    Sentinel,
}

#[derive(Debug, Clone, Copy)]
pub struct Options {
    pub chunk_size: usize,
    pub flush: FlushMode,
    pub tokenizer: TokenizerConfig,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            flush: FlushMode::default(),
            tokenizer: TokenizerConfig::default(),
        }
    }
}

/// Counters reported after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub bytes: u64,
    pub chunks: u64,
    pub tokens: u64,
}

/// Writes `(len line:column) text` and a newline.
pub fn write_token<W: Write>(out: &mut W, token: &Token<'_>) -> io::Result<()> {
    write!(out, "({} {}) ", token.len(), token.position())?;
    out.write_all(token.as_bytes())?;
    out.write_all(b"\n")
}

/// Tokenizes everything `reader` yields and prints each token to `out`.
pub fn run<R: Read, W: Write>(
    mut reader: R,
    mut out: W,
    options: &Options,
) -> Result<Summary, CatError> {
    let mut tokenizer = Tokenizer::try_with_config(options.tokenizer)?;
    let mut chunk = read_buffer(options.chunk_size.max(1))?;
    let mut summary = Summary::default();

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(CatError::Read(e)),
        };
        summary.bytes += n as u64;
        summary.chunks += 1;

        tokenizer.feed(&chunk[..n])?;
        summary.tokens += drain(&mut tokenizer, &mut out, Tokenizer::next_token)?;
    }

    tracing::debug!(
        pending = tokenizer.buffered_len(),
        mode = ?options.flush,
        "end of input"
    );
    summary.tokens += match options.flush {
        FlushMode::Explicit => drain(&mut tokenizer, &mut out, Tokenizer::flush)?,
        FlushMode::Sentinel => {
            tokenizer.feed(SENTINEL)?;
            drain(&mut tokenizer, &mut out, Tokenizer::next_token)?
        }
    };

    out.flush().map_err(CatError::Write)?;
    tracing::info!(
        bytes = summary.bytes,
        chunks = summary.chunks,
        tokens = summary.tokens,
        "done"
    );
    Ok(summary)
}

fn read_buffer(len: usize) -> Result<Vec<u8>, lexi::Error> {
    let mut chunk = Vec::new();
    chunk
        .try_reserve_exact(len)
        .map_err(|_| lexi::Error::OutOfMemory { requested: len })?;
    chunk.resize(len, 0);
    Ok(chunk)
}

fn drain<W: Write>(
    tokenizer: &mut Tokenizer,
    out: &mut W,
    mut pull: impl FnMut(&mut Tokenizer) -> Option<Token<'_>>,
) -> Result<u64, CatError> {
    let mut count = 0;
    while let Some(token) = pull(tokenizer) {
        write_token(out, &token).map_err(CatError::Write)?;
        count += 1;
    }
    Ok(count)
}
