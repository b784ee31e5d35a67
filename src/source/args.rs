//! Argument-vector source: parses `--name=value` tokens.

use super::{OptionsSource, RawOptions, SourceError};

/// Reads options from a flat sequence of command-line style tokens.
///
/// Accepted forms:
/// - `--name=value` — an explicit value (which may be empty: `--name=`)
/// - `--name` — boolean shorthand for `--name=true`
///
/// Kebab-case names are normalized to snake_case, so `--metrics-location`
/// and `--metrics_location` address the same option. Names the schema does
/// not declare are still parsed and passed along; whether they are typed or
/// retained as passthrough values is the resolver's decision.
#[derive(Debug, Clone)]
pub struct ArgsSource {
    args: Vec<String>,
}

impl ArgsSource {
    /// Creates a source over the given tokens.
    pub fn new<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the unparsed tokens.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl OptionsSource for ArgsSource {
    fn read(&self) -> Result<RawOptions, SourceError> {
        let mut raw = RawOptions::new();
        for token in &self.args {
            let (name, value) = parse_token(token)?;
            raw.push(name, value);
        }
        Ok(raw)
    }

    fn origin(&self) -> String {
        "args".to_string()
    }
}

/// Parses one argument token into a (name, value) pair.
///
/// Shared with the file source, whose lines use the same syntax.
pub(super) fn parse_token(token: &str) -> Result<(String, String), SourceError> {
    let invalid = || SourceError::InvalidToken {
        token: token.to_string(),
    };

    let body = token.strip_prefix("--").ok_or_else(invalid)?;

    let (name, value) = match body.split_once('=') {
        Some((name, value)) => (name, value.to_string()),
        None => (body, "true".to_string()),
    };

    if name.is_empty() {
        return Err(invalid());
    }

    Ok((name.replace('-', "_"), value))
}
