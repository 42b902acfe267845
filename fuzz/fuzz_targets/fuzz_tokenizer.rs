#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lexi::{Error, Tokenizer, TokenizerConfig};

#[derive(Debug, Arbitrary)]
struct Input {
    config: TokenizerConfig,
    data: Vec<u8>,
    /// Chunk lengths, cycled until `data` is exhausted.
    splits: Vec<u8>,
}

type Triple = (Vec<u8>, usize, usize);

/// Tokenize `data` in chunks, returning the tokens or the first error.
fn tokenize(config: TokenizerConfig, data: &[u8], splits: &[u8]) -> Result<Vec<Triple>, Error> {
    let mut tokenizer = Tokenizer::with_config(config);
    let mut out = Vec::new();
    let mut rest = data;
    let mut sizes = splits.iter().cycle();

    while !rest.is_empty() {
        let size = sizes.next().map_or(rest.len(), |&n| (n as usize).max(1));
        let (chunk, tail) = rest.split_at(size.min(rest.len()));
        rest = tail;

        tokenizer.feed(chunk)?;
        while let Some(tok) = tokenizer.next_token() {
            out.push((tok.as_bytes().to_vec(), tok.line(), tok.column()));
        }
        assert!(tokenizer.buffered_len() <= config.max_buffered_len);
    }
    while let Some(tok) = tokenizer.flush() {
        out.push((tok.as_bytes().to_vec(), tok.line(), tok.column()));
    }
    assert!(tokenizer.is_empty());
    Ok(out)
}

fuzz_target!(|input: Input| {
    let whole = tokenize(TokenizerConfig::new(), &input.data, &[]);
    let Ok(whole) = whole else {
        return;
    };

    let total: usize = whole.iter().map(|t| t.0.len()).sum();
    let non_ws = input.data.iter().filter(|&&b| !lexi::is_whitespace(b)).count();
    assert_eq!(total, non_ws);

    // Past isize::MAX the reservation fails without allocating; smaller
    // values are clamped.
    let initial_capacity = if input.config.initial_capacity > isize::MAX as usize {
        assert!(matches!(
            Tokenizer::try_with_config(input.config),
            Err(Error::OutOfMemory { .. })
        ));
        input.config.initial_capacity
    } else {
        input.config.initial_capacity % 4096
    };
    let config = TokenizerConfig {
        initial_capacity,
        ..input.config
    };

    let unlimited = config.unlimited();
    match tokenize(unlimited, &input.data, &input.splits) {
        Ok(chunked) => assert_eq!(chunked, whole),
        Err(err) => panic!("unlimited tokenizer failed: {err}"),
    }

    // A limited tokenizer either fails or agrees.
    if let Ok(limited) = tokenize(config, &input.data, &input.splits) {
        assert_eq!(limited, whole);
    }
});
