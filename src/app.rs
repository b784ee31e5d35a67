//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use tracing::Level;
use tracing_subscriber::EnvFilter;

use flowopts::pipeline::PipelineError;
use flowopts::resolve::ResolveError;
use flowopts::source::SourceError;

use crate::run::RunError;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - invalid tokens, unreadable
    /// options file, failed validation.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &RunError) {
    if let RunError::Pipeline(PipelineError::Resolve(ResolveError::Source(source))) = error {
        match source {
            SourceError::FileRead { path, .. } => {
                eprintln!(
                    "\nCheck that the options file '{}' exists and is readable.",
                    path.display()
                );
            }
            SourceError::InvalidToken { .. } => {
                eprintln!("\nOption tokens look like --name=value or --name.");
            }
        }
    }
}

/// Sets up the tracing subscriber for logging.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
