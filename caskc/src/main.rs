//! `caskc` — a thin CLI front-end over `cask_par::parse`.
//!
//! Reads a cask source file, parses it, and prints the resolved model
//! to stdout (debug or JSON), or the accumulated parse errors to stderr.

mod error;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use error::{CaskcError, Result};

/// Parses a cask DSL source file and prints its resolved model.
#[derive(Parser, Debug)]
#[command(name = "caskc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Parse a cask DSL source file and print its resolved model", long_about = None)]
struct Cli {
    /// Cask source file to parse
    file: PathBuf,

    /// Output format for the resolved model
    #[arg(long, value_enum, default_value_t = Format::Debug)]
    format: Format,

    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true, env = "CASKC_VERBOSE")]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Debug,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let source = fs::read_to_string(&cli.file).map_err(|source| CaskcError::ReadFile {
        path: cli.file.display().to_string(),
        source,
    })?;
    debug!(path = %cli.file.display(), bytes = source.len(), "read cask source");

    let cask = cask_par::parse(&source).map_err(CaskcError::Parse)?;

    match cli.format {
        Format::Debug => println!("{cask:#?}"),
        Format::Json => {
            let json = serde_json::to_string_pretty(&cask).map_err(CaskcError::Serialize)?;
            println!("{json}");
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose { EnvFilter::new("debug") } else { EnvFilter::new("info") };

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false).with_thread_names(false);

    let _ = tracing_subscriber::registry().with(filter).with(subscriber).try_init();
}
