//! Tagger CLI
//!
//! Usage:
//!   tagger render [OPTIONS] [FILE]
//!   tagger bench [OPTIONS]
//!
//! Render options:
//!   -d, --dict <FILE>        Dictionary file (TOML, `[[tags]]` entries)
//!   -s, --set <NAME=VALUE>   Define a placeholder; overrides the dictionary file
//!   -r, --report             Print skipped placeholders to stderr
//!
//! Logging goes to stderr and follows `RUST_LOG`.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use tagger::bench::{run_append_benchmark, BenchParams};
use tagger::{process_with_report, Dictionary};

#[derive(Parser)]
#[command(name = "tagger")]
#[command(about = "Recursive {{placeholder}} substitution")]
struct Cli {
    /// Log debug events (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a template and print the result
    Render(RenderArgs),
    /// Time output buffer appends and write CSV
    Bench(BenchArgs),
}

#[derive(Args)]
struct RenderArgs {
    /// Template file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Dictionary file (TOML)
    #[arg(short, long)]
    dict: Option<PathBuf>,

    /// Placeholder definition as NAME=VALUE; may be repeated
    #[arg(short, long = "set", value_name = "NAME=VALUE")]
    set: Vec<String>,

    /// Print placeholders that were left empty
    #[arg(short, long)]
    report: bool,
}

#[derive(Args)]
struct BenchArgs {
    /// Largest number of appends per run
    #[arg(long, default_value_t = 100_000)]
    max_appends: usize,

    /// Longest appended text in bytes
    #[arg(long, default_value_t = 100)]
    max_len: usize,

    /// Increment between append counts
    #[arg(long, default_value_t = 100)]
    step: usize,

    /// CSV output file (stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Render(args) => render(args),
        Command::Bench(args) => bench(args),
    };

    if let Err(message) = result {
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_filter(filter),
        )
        .init();
}

fn render(args: RenderArgs) -> Result<(), String> {
    if args.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return Ok(());
    }

    let mut dictionary = match &args.dict {
        Some(path) => Dictionary::from_file(path)
            .map_err(|e| format!("loading dictionary '{}': {}", path.display(), e))?,
        None => Dictionary::new(),
    };

    let overrides = args
        .set
        .iter()
        .map(|s| Dictionary::parse_assignment(s))
        .collect::<Result<Dictionary, _>>()
        .map_err(|e| e.to_string())?;
    dictionary.prepend(overrides);

    let (source, filename) = match &args.input {
        Some(path) => (
            fs::read_to_string(path)
                .map_err(|e| format!("reading file '{}': {}", path.display(), e))?,
            path.display().to_string(),
        ),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| format!("reading from stdin: {}", e))?;
            (buffer, "<stdin>".to_string())
        }
    };

    let (output, report) = process_with_report(&source, &dictionary).map_err(|e| e.to_string())?;
    print!("{}", output);

    if args.report && !report.is_clean() {
        eprint!("{}", report.format(&source, &filename));
    }

    Ok(())
}

fn bench(args: BenchArgs) -> Result<(), String> {
    let params = BenchParams::default()
        .with_max_appends(args.max_appends)
        .with_max_len(args.max_len)
        .with_step(args.step);

    let mut out: Box<dyn io::Write> = match &args.output {
        Some(path) => Box::new(io::BufWriter::new(
            fs::File::create(path)
                .map_err(|e| format!("creating '{}': {}", path.display(), e))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let mut last_percent = 0;
    let samples = run_append_benchmark(&params, &mut out, |fraction| {
        let percent = (fraction * 100.0).floor() as u32;
        if percent >= last_percent + 10 {
            last_percent = percent;
            info!(percent, "benchmark progress");
        }
    })
    .map_err(|e| e.to_string())?;

    info!(samples = samples.len(), "benchmark complete");
    Ok(())
}

fn print_intro() {
    println!(
        r#"Tagger - recursive {{{{placeholder}}}} substitution

USAGE:
    tagger render [OPTIONS] [FILE]
    echo 'Hi {{{{name}}}}' | tagger render --set name=Bob

RENDER OPTIONS:
    -d, --dict <FILE>        Dictionary file (TOML)
    -s, --set <NAME=VALUE>   Define a placeholder (repeatable)
    -r, --report             Show placeholders that were left empty
    -v, --verbose            Log resolution details

DICTIONARY FORMAT:
    [[tags]]
    name = "greeting"
    replacement = "Hi, {{{{name}}}}"

Replacements may reference other placeholders. Cycles and chains deeper
than {} expansions render as empty text."#,
        tagger::MAX_DEPTH
    );
}
