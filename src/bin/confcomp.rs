//! Compile a SnappySense configuration file to its binary form.
//!
//! Usage:
//!   confcomp [OPTIONS] <INPUT> <OUTPUT>
//!
//! Options:
//!   --listing     Print a record listing of the compiled program to stdout
//!   --check       Compile but do not write OUTPUT
//!   -v, --verbose Log progress to stderr (-vv for per-statement detail)
//!
//! Exit status is 0 on success, 1 on a compilation error, 2 on bad arguments.
//! `RUST_LOG` overrides the log filter.

use clap::{ArgAction, Parser};
use confcomp::{
    compile, listing, sink, CompileError, CompilerConfig, LineSource, OutputBuffer, Program,
    SNAPPYSENSE,
};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "confcomp",
    version,
    about = "Compile a SnappySense configuration file to its binary form"
)]
struct Cli {
    /// Configuration source file
    #[arg(value_name = "INPUT")]
    input: PathBuf,
    /// Destination of the binary blob (created or overwritten)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,
    /// Print a record listing to stdout after compiling
    #[arg(long, action = ArgAction::SetTrue)]
    listing: bool,
    /// Compile only; leave OUTPUT untouched
    #[arg(long, action = ArgAction::SetTrue)]
    check: bool,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn compile_input(cli: &Cli) -> Result<(Program, OutputBuffer), CompileError> {
    let config = CompilerConfig::from_env();
    let mut source = LineSource::from_path(&cli.input)?;
    compile(&mut source, &SNAPPYSENSE, &config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (program, out) = match compile_input(&cli) {
        Ok(compiled) => compiled,
        Err(e) => {
            eprintln!("confcomp: {}: {}", cli.input.display(), e);
            std::process::exit(1);
        }
    };
    if !cli.check {
        if let Err(e) = sink::write_output(&cli.output, out.as_bytes()) {
            eprintln!("confcomp: {}", e);
            std::process::exit(1);
        }
    }

    if cli.listing {
        io::stdout().write_all(listing::render(&program, &SNAPPYSENSE).as_bytes())?;
    }
    Ok(())
}
