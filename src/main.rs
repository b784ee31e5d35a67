//! flowopts: pipeline options inspector.
//!
//! Entry point for the flowopts binary.

use std::process::ExitCode;

mod app;
mod cli;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};
use cli::{Cli, Command};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();
    setup_tracing(cli.verbose);

    let result = match cli.command {
        Some(Command::Resolve { ref tokens }) => run::resolve_output(tokens, cli.format),
        Some(Command::Schema) | None => run::schema_output(cli.format),
    };

    match result {
        Ok(output) => {
            println!("{output}");
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            print_config_hint(&e);
            exit_code::CONFIG_ERROR
        }
    }
}
