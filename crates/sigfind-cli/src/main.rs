//! Command-line front end.
//!
//! Loads one or more JSON catalogs, runs a single query, and prints the
//! ranked results. Exit code 1 reports a query syntax error, 2 a catalog or
//! I/O problem.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::{Parser, ValueEnum};
use sigfind_engine::SearchClient;
use sigfind_model::{ApiDictionary, Mode, OptionStatus, SearchError, SearchOptions};
use tracing::info;

/// CLI arguments for the sigfind binary.
#[derive(Parser, Debug)]
#[command(name = "sigfind", version, about = "Signature-directed API search")]
struct CliArgs {
    /// Catalog file (a JSON-serialized dictionary). Repeatable.
    #[arg(long = "lib", value_name = "FILE", required = true)]
    libs: Vec<PathBuf>,

    /// Query dialect.
    #[arg(long, value_enum, default_value_t = DialectArg::FSharp)]
    mode: DialectArg,

    /// Let a trailing query wildcard absorb a whole arrow tail.
    #[arg(long)]
    greedy: bool,

    /// Compare identities case-insensitively.
    #[arg(long = "ignore-case")]
    ignore_case: bool,

    /// Do not charge distance for display/compiled name differences.
    #[arg(long = "ignore-name-difference")]
    ignore_name_difference: bool,

    /// Disable curried/tupled reshaping and abbreviation unwrapping.
    #[arg(long = "strict-parameter-style")]
    strict_parameter_style: bool,

    /// Adjacent-swap budget for argument order tolerance.
    #[arg(long = "swap-order-depth", default_value_t = 2)]
    swap_order_depth: i64,

    /// Trailing-optional drop budget.
    #[arg(long = "complement-depth", default_value_t = 2)]
    complement_depth: i64,

    /// Scan catalogs on a worker pool.
    #[arg(long)]
    parallel: bool,

    /// The query text.
    #[arg(value_name = "QUERY")]
    query: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum DialectArg {
    #[value(name = "fsharp")]
    FSharp,
    #[value(name = "csharp")]
    CSharp,
}

fn search_options(args: &CliArgs) -> SearchOptions {
    let status = |enabled: bool| {
        if enabled { OptionStatus::Enabled } else { OptionStatus::Disabled }
    };
    SearchOptions {
        greedy_matching: status(args.greedy),
        respect_name_difference: status(!args.ignore_name_difference),
        ignore_parameter_style: status(!args.strict_parameter_style),
        ignore_case: status(args.ignore_case),
        parallel: status(args.parallel),
        mode: match args.mode {
            DialectArg::FSharp => Mode::FSharp,
            DialectArg::CSharp => Mode::CSharp,
        },
        ..SearchOptions::default()
    }
    .with_swap_order_depth(args.swap_order_depth)
    .with_complement_depth(args.complement_depth)
}

fn load_dictionary(path: &Path) -> Result<ApiDictionary> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn run(args: &CliArgs) -> Result<ExitCode> {
    let dictionaries = args
        .libs
        .iter()
        .map(|path| load_dictionary(path))
        .collect::<Result<Vec<_>>>()?;
    info!(catalogs = dictionaries.len(), "catalogs loaded");

    let client = SearchClient::new(dictionaries)?;
    let options = search_options(args);
    let stream = match client.search(&options, &args.query) {
        Ok(stream) => stream,
        Err(error @ SearchError::QuerySyntax { .. }) => {
            eprintln!("{error}");
            return Ok(ExitCode::from(1));
        }
        Err(error) => return Err(error.into()),
    };

    let mut results: Vec<_> = stream.collect();
    // The stream is in catalog order; a stable sort ranks by distance while
    // keeping that order within equal distances.
    results.sort_by_key(|result| result.distance);
    for result in &results {
        println!("{:>3}  {}  [{}]", result.distance, result.api, result.assembly_name);
    }
    info!(results = results.len(), "search finished");
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let args = CliArgs::parse();
    match run(&args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(2)
        }
    }
}
