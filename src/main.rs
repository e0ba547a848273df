//! Docrank - priority ranking and recommendations for markdown documents
//!
//! Tracks a set of markdown files, scores them with user-defined weighted
//! metrics and suggests what to read next using TF-IDF similarity.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use cli::{Cli, OutputFormat};
use docrank_core::error::{DocrankError, ExitCode as DocrankExitCode};
use docrank_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let argv_format_json = argv_requests_json();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if argv_format_json => {
            // clap fails before `Cli.format` exists; honour a JSON request anyway
            let error = usage_error_from_clap(err);
            eprintln!("{}", error.to_json());
            return ExitCode::from(error.exit_code() as u8);
        }
        Err(err) => err.exit(),
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    let result = commands::dispatch::run(&cli, start);

    match result {
        Ok(()) => ExitCode::from(DocrankExitCode::Success as u8),
        Err(e) => report_error(&cli, &e),
    }
}

fn report_error(cli: &Cli, error: &DocrankError) -> ExitCode {
    match cli.format {
        OutputFormat::Json => eprintln!("{}", error.to_json()),
        OutputFormat::Human if !cli.quiet => eprintln!("error: {}", error),
        OutputFormat::Human => {}
    }
    ExitCode::from(error.exit_code() as u8)
}

/// Map a clap parse failure onto the JSON error envelope
///
/// Help and version requests still exit through clap.
fn usage_error_from_clap(err: clap::Error) -> DocrankError {
    use clap::error::ErrorKind;

    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        ErrorKind::ValueValidation
        | ErrorKind::InvalidValue
        | ErrorKind::InvalidSubcommand
        | ErrorKind::UnknownArgument
        | ErrorKind::MissingRequiredArgument
        | ErrorKind::MissingSubcommand
        | ErrorKind::ArgumentConflict => DocrankError::UsageError(err.to_string()),
        _ => DocrankError::Other(err.to_string()),
    }
}

fn argv_requests_json() -> bool {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--format" {
            if args.next().is_some_and(|v| v == "json") {
                return true;
            }
        } else if arg == "--format=json" {
            return true;
        }
    }
    false
}
