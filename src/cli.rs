//! CLI argument parsing using clap.
//!
//! This is the inspector's own interface. The pipeline option tokens it
//! forwards are parsed by the library's argument source, not by clap:
//! unknown-flag passthrough is part of the options contract and clap would
//! reject what the resolver must retain.

use clap::{Parser, Subcommand, ValueEnum};

/// flowopts: pipeline options inspector
///
/// Resolves pipeline option tokens against the pipeline schema and prints
/// the resulting job-metadata document, or lists the schema itself.
#[derive(Debug, Parser)]
#[command(name = "flowopts")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run (default: schema)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format
    #[arg(long, value_enum, default_value = "json", global = true)]
    pub format: Format,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for flowopts
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve option tokens and print the interchange document
    Resolve {
        /// Pipeline option tokens (`--name=value` or `--name`)
        #[arg(value_name = "TOKEN", trailing_var_arg = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },

    /// Print the composed pipeline schema
    Schema,
}

/// Output format for inspector commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Machine-readable JSON
    Json,
    /// Human-readable table
    Table,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}
