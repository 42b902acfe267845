//! Tests for async streaming support.
//!
//! These tests verify the tokio channel adapter and the futures `Stream`
//! adapter produce the same tokens as the synchronous tokenizer.

#![cfg(any(feature = "tokio", feature = "futures"))]

use lexi::async_stream::{StreamConfig, StreamError};
use lexi::{Error, OwnedToken, Position, TokenizerConfig};

fn texts(tokens: &[OwnedToken]) -> Vec<String> {
    tokens
        .iter()
        .map(|t| String::from_utf8_lossy(&t.bytes).into_owned())
        .collect()
}

#[test]
fn test_stream_config_default() {
    let config = StreamConfig::default();
    assert_eq!(config.channel_capacity, 256);
    assert_eq!(config.max_chunk_size, 64 * 1024);
}

#[test]
fn test_stream_error_from_tokenizer_error() {
    let err = StreamError::from(Error::BufferLimitExceeded {
        requested: 9,
        limit: 8,
    });
    assert!(matches!(
        err,
        StreamError::Tokenizer(Error::BufferLimitExceeded { .. })
    ));
}

#[cfg(feature = "tokio")]
mod tokio_tests {
    use super::*;
    use lexi::async_stream::tokio_impl::{AsyncTokenizer, tokenize_reader};
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_async_tokenizer_basic() {
        let (tx, mut rx) = mpsc::channel(32);

        let mut tokenizer = AsyncTokenizer::new(tx);
        tokenizer.feed(b"ab\ncd ef").await.unwrap();
        tokenizer.finish().await.unwrap();

        let mut tokens = Vec::new();
        while let Some(tok) = rx.recv().await {
            tokens.push(tok);
        }

        assert_eq!(texts(&tokens), ["ab", "cd", "ef"]);
        assert_eq!(tokens[2].position, Position::new(2, 3));
    }

    #[tokio::test]
    async fn test_async_tokenizer_chunked() {
        let (tx, mut rx) = mpsc::channel(32);

        tokio::spawn(async move {
            let mut tokenizer = AsyncTokenizer::new(tx);
            for chunk in [&b"hel"[..], b"lo wo", b"rld"] {
                tokenizer.feed(chunk).await.unwrap();
            }
            tokenizer.finish().await.unwrap();
        });

        let mut tokens = Vec::new();
        while let Some(tok) = rx.recv().await {
            tokens.push(tok);
        }

        assert_eq!(texts(&tokens), ["hello", "world"]);
        assert_eq!(tokens[1].position, Position::new(1, 6));
    }

    #[tokio::test]
    async fn test_chunk_too_large() {
        let (tx, _rx) = mpsc::channel(4);
        let config = StreamConfig {
            max_chunk_size: 4,
            ..StreamConfig::small()
        };

        let mut tokenizer = AsyncTokenizer::with_config(tx, config);
        let result = tokenizer.feed(b"too long").await;
        assert!(matches!(
            result,
            Err(StreamError::ChunkTooLarge { size: 8, max: 4 })
        ));
        assert_eq!(tokenizer.buffered_len(), 0);
    }

    #[tokio::test]
    async fn test_channel_closure_detected() {
        let (tx, rx) = mpsc::channel(4);
        drop(rx);

        let mut tokenizer = AsyncTokenizer::new(tx);
        let result = tokenizer.feed(b"a b ").await;
        assert!(matches!(result, Err(StreamError::ChannelClosed)));
    }

    #[tokio::test]
    async fn test_tokenize_reader() {
        let (tx, mut rx) = mpsc::channel(8);
        let input: &[u8] = b"fn main() {\n    body();\n}";
        let config = StreamConfig::from_chunk_size(3);

        let handle = tokio::spawn(async move { tokenize_reader(input, tx, config).await });

        let mut tokens = Vec::new();
        while let Some(tok) = rx.recv().await {
            tokens.push(tok);
        }

        let read = handle.await.unwrap().unwrap();
        assert_eq!(read, input.len() as u64);
        assert_eq!(texts(&tokens), ["fn", "main()", "{", "body();", "}"]);
        assert_eq!(tokens[3].position, Position::new(2, 4));
        assert_eq!(tokens[4].position, Position::new(3, 0));
    }

    #[tokio::test]
    async fn test_tokenize_reader_limit() {
        let (tx, _rx) = mpsc::channel(8);
        let config = StreamConfig {
            tokenizer: TokenizerConfig::new().with_max_buffered_len(4),
            ..StreamConfig::from_chunk_size(2)
        };

        let result = tokenize_reader(&b"abcdefgh"[..], tx, config).await;
        assert!(matches!(
            result,
            Err(StreamError::Tokenizer(Error::BufferLimitExceeded {
                requested: 6,
                limit: 4
            }))
        ));
    }

    #[tokio::test]
    async fn test_tokenize_reader_unallocatable_chunk() {
        let (tx, _rx) = mpsc::channel(8);
        let config = StreamConfig::from_chunk_size(usize::MAX);

        let result = tokenize_reader(&b"a b"[..], tx, config).await;
        assert!(matches!(
            result,
            Err(StreamError::Tokenizer(Error::OutOfMemory { .. }))
        ));
    }
}

#[cfg(feature = "futures")]
mod futures_tests {
    use super::*;
    use futures_core::Stream;
    use lexi::async_stream::futures_impl::TokenStream;
    use std::pin::Pin;
    use std::task::{Context, Poll, Waker};

    struct ChunkIter {
        chunks: Vec<&'static [u8]>,
        index: usize,
    }

    impl ChunkIter {
        fn new(chunks: Vec<&'static [u8]>) -> Self {
            Self { chunks, index: 0 }
        }
    }

    impl Stream for ChunkIter {
        type Item = &'static [u8];

        fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
            if self.index < self.chunks.len() {
                let chunk = self.chunks[self.index];
                self.index += 1;
                Poll::Ready(Some(chunk))
            } else {
                Poll::Ready(None)
            }
        }
    }

    /// Polls a stream that never returns `Pending` to completion.
    fn drain<S: Stream + Unpin>(mut stream: S) -> Vec<S::Item> {
        let mut cx = Context::from_waker(Waker::noop());
        let mut items = Vec::new();
        loop {
            match Pin::new(&mut stream).poll_next(&mut cx) {
                Poll::Ready(Some(item)) => items.push(item),
                Poll::Ready(None) => return items,
                Poll::Pending => panic!("chunk stream never pends"),
            }
        }
    }

    #[test]
    fn test_token_stream_flushes_at_end() {
        let stream = TokenStream::new(ChunkIter::new(vec![&b"one tw"[..], b"o\nthr", b"ee"]));
        let tokens: Vec<OwnedToken> = drain(stream).into_iter().map(Result::unwrap).collect();

        assert_eq!(texts(&tokens), ["one", "two", "three"]);
        assert_eq!(tokens[2].position, Position::new(2, 0));
    }

    #[test]
    fn test_token_stream_empty() {
        let stream = TokenStream::new(ChunkIter::new(vec![]));
        assert!(drain(stream).is_empty());
    }

    #[test]
    fn test_token_stream_error_ends_stream() {
        let config = TokenizerConfig::new().with_max_buffered_len(3);
        let stream = TokenStream::with_config(ChunkIter::new(vec![&b"a "[..], b"long "]), config);
        let items = drain(stream);

        assert_eq!(items.len(), 2);
        assert!(matches!(&items[0], Ok(tok) if tok.bytes == b"a"));
        assert!(matches!(
            items[1],
            Err(StreamError::Tokenizer(Error::BufferLimitExceeded { .. }))
        ));
    }
}
