use clap::Parser as ArgParser;
use lexi::TokenizerConfig;
use lexi_cat::{CatError, DEFAULT_CHUNK_SIZE, FlushMode, MAX_CHUNK_SIZE, Options, Summary, run};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

mod logging;

/// Print every whitespace separated token of the input as
/// `(length line:column) text`.
#[derive(ArgParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to tokenize; reads stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Bytes per read
    #[arg(
        long,
        default_value_t = DEFAULT_CHUNK_SIZE,
        value_parser = chunk_size_in_range
    )]
    chunk_size: usize,

    /// Fail if a single token needs more than this many buffered bytes
    #[arg(long)]
    max_buffer: Option<usize>,

    /// Release the last token by feeding trailing whitespace instead of flushing
    #[arg(long)]
    sentinel: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn options(&self) -> Options {
        let mut tokenizer = TokenizerConfig::new().with_initial_capacity(self.chunk_size);
        if let Some(max) = self.max_buffer {
            tokenizer = tokenizer.with_max_buffered_len(max);
        }
        Options {
            chunk_size: self.chunk_size,
            flush: if self.sentinel {
                FlushMode::Sentinel
            } else {
                FlushMode::Explicit
            },
            tokenizer,
        }
    }
}

fn chunk_size_in_range(arg: &str) -> Result<usize, String> {
    let size: usize = arg.parse().map_err(|e| format!("{e}"))?;
    if (1..=MAX_CHUNK_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(format!("must be between 1 and {MAX_CHUNK_SIZE}"))
    }
}

fn execute(args: &Args) -> Result<Summary, CatError> {
    let options = args.options();
    let out = BufWriter::new(io::stdout().lock());

    match &args.input {
        Some(path) => {
            let file = File::open(path).map_err(|source| CatError::Open {
                path: path.clone(),
                source,
            })?;
            run(file, out, &options)
        }
        None => run(io::stdin().lock(), out, &options),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match execute(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) if err.is_broken_pipe() => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "aborting");
            eprintln!("lexi-cat: {err}");
            ExitCode::FAILURE
        }
    }
}
