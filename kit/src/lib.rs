#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]
//! lexi: a streaming, incremental whitespace tokenizer.
//!
//! This crate re-exports [`lexi_core`]. See [`Tokenizer`] to get started.
pub use lexi_core::*;
