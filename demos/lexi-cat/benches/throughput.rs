use divan::{Bencher, black_box};
use lexi::Tokenizer;
use lexi_cat::{Options, run};

use divan::AllocProfiler;

#[allow(unused)]
#[cfg_attr(feature = "alloc", global_allocator)]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    divan::main();
}

const SAMPLE_LINES: &[&str] = &[
    "fn main() { let x = 42; }",
    "the quick brown fox jumps over the lazy dog",
    "\tindented\twith\ttabs and trailing space   ",
    "SELECT id, name FROM users WHERE active = true;",
];

/// Generate N lines of mixed text
fn generate_text(count: usize) -> Vec<u8> {
    let mut result = Vec::with_capacity(count * 48);
    for i in 0..count {
        result.extend_from_slice(SAMPLE_LINES[i % SAMPLE_LINES.len()].as_bytes());
        result.push(b'\n');
    }
    result
}

#[divan::bench(
    name = "tokenize_chunked",
    args = [1, 16, 512, 4096, 65536],
)]
fn bench_tokenize_chunked(bencher: Bencher, chunk_size: usize) {
    let input = generate_text(10_000);

    bencher
        .counter(divan::counter::BytesCount::new(input.len()))
        .bench(|| {
            let mut tokenizer = Tokenizer::new();
            let mut count = 0usize;
            for chunk in input.chunks(chunk_size) {
                tokenizer.feed(chunk).unwrap();
                while let Some(tok) = tokenizer.next_token() {
                    count += black_box(tok.len());
                }
            }
            while let Some(tok) = tokenizer.flush() {
                count += black_box(tok.len());
            }
            count
        });
}

#[divan::bench(
    name = "long_token",
    args = [1024, 65536, 1_048_576],
)]
fn bench_long_token(bencher: Bencher, len: usize) {
    let input = vec![b'x'; len];

    bencher
        .counter(divan::counter::BytesCount::new(len))
        .bench(|| {
            let mut tokenizer = Tokenizer::new();
            for chunk in input.chunks(4096) {
                tokenizer.feed(chunk).unwrap();
                assert!(tokenizer.next_token().is_none());
            }
            black_box(tokenizer.flush().map(|t| t.len()))
        });
}

#[divan::bench(
    name = "print_listing",
    args = [100, 10_000],
)]
fn bench_print_listing(bencher: Bencher, n: usize) {
    let input = generate_text(n);

    bencher
        .counter(divan::counter::BytesCount::new(input.len()))
        .with_inputs(|| Vec::with_capacity(input.len() * 2))
        .bench_values(|mut out: Vec<u8>| {
            black_box(run(&input[..], &mut out, &Options::default()).unwrap())
        });
}
