//! Streaming whitespace tokenizer.
//!
//! Feed input in chunks of any size with [`Tokenizer::feed`] and pull tokens
//! with [`Tokenizer::next_token`]. A token is a maximal run of non-whitespace
//! bytes, reported with its byte length, line and column. Consumed bytes are
//! reclaimed on every feed, so the whole input never has to be in memory.
//!
//! # Features
//!
//! - `std` (default)
//! - `serde`: serialization for [`Position`], [`OwnedToken`] and [`TokenizerConfig`]
//! - `tokio`: channel and `AsyncRead` adapters in [`async_stream::tokio_impl`]
//! - `futures`: a `Stream` adapter in [`async_stream::futures_impl`]
//! - `fuzz`: `arbitrary::Arbitrary` for [`TokenizerConfig`]

mod buffer;
pub mod config;
mod error;
mod position;
mod token;
pub mod tokenizer;

#[cfg(any(feature = "tokio", feature = "futures"))]
pub mod async_stream;

pub use config::TokenizerConfig;
pub use error::Error;
pub use position::Position;
pub use token::{OwnedToken, Token};
pub use tokenizer::{DebugDump, OwnedTokens, ScanState, Tokenizer, is_whitespace};
