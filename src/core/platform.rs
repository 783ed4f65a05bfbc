//! Process-level entry helpers: argument parsing and fatal error reporting.

use crate::core::cli::CliArgs;
use crate::logging::FILE_ONLY_TARGET;

/// Report a fatal error and exit with status 1.
///
/// The error is printed to stderr once; the log file, if any, gets its own copy.
pub fn handle_error(error: anyhow::Error) -> ! {
    tracing::error!(target: FILE_ONLY_TARGET, "{error:#}");
    eprintln!();
    eprintln!("Error running penstroke:");
    for (depth, cause) in error.chain().enumerate() {
        if depth == 0 {
            eprintln!("{cause}");
        } else {
            eprintln!("  caused by: {cause}");
        }
    }
    eprintln!();
    eprintln!("Try running with --help for usage information.");
    std::process::exit(1);
}

/// Parse command line arguments, exiting with usage on failure.
pub fn get_cli_args() -> CliArgs {
    use clap::Parser;
    CliArgs::parse()
}
