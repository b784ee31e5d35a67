//! Error types for the resolution pass.

use std::fmt;

use thiserror::Error;

use crate::schema::OptionKind;
use crate::source::SourceError;

/// Error type for resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A source could not be read. Fatal and immediate; an explicitly
    /// requested source is never silently skipped.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// One or more raw values failed conversion or validation. Collected
    /// across the whole pass and reported together.
    #[error(transparent)]
    Invalid(#[from] InvalidOptions),
}

/// One conversion or validation failure for a single field.
#[derive(Debug, Error)]
pub enum ResolveIssue {
    /// The raw value cannot be cast to the declared kind.
    #[error("Option '{name}': cannot convert '{value}' to {expected}")]
    Conversion {
        /// The declaration name
        name: String,
        /// The offending raw value
        value: String,
        /// The declared kind
        expected: OptionKind,
    },

    /// The raw value is not a member of the declared enum domain.
    #[error("Option '{name}': value '{value}' is not one of [{}]", domain.join(", "))]
    UnknownEnumValue {
        /// The declaration name
        name: String,
        /// The rejected value
        value: String,
        /// The declared domain
        domain: Vec<String>,
    },
}

/// The batch report of every field that failed conversion or validation.
#[derive(Debug)]
pub struct InvalidOptions {
    /// All collected issues, in field-name order.
    pub issues: Vec<ResolveIssue>,
}

impl fmt::Display for InvalidOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} invalid option value(s):", self.issues.len())?;
        for issue in &self.issues {
            writeln!(f, "  - {issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for InvalidOptions {}
