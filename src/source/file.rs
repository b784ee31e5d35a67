//! Options-file source: newline-delimited argument tokens.

use std::path::{Path, PathBuf};

use super::args::parse_token;
use super::{OptionsSource, RawOptions, SourceError};

/// Reads options from a plain-text file, one argument token per line.
///
/// Each non-blank line is parsed exactly like an [`ArgsSource`](super::ArgsSource)
/// token (`--name=value` or `--name`); surrounding whitespace is trimmed and
/// blank lines are ignored. There are no further escaping rules.
///
/// The read is blocking and happens once per [`read`](OptionsSource::read)
/// call. A missing or unreadable file is a fatal configuration error, never
/// a silent skip: the file was explicitly requested, and configuration files
/// are not expected to be transiently unavailable, so there is no retry.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source over the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path the source reads from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OptionsSource for FileSource {
    fn read(&self) -> Result<RawOptions, SourceError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| SourceError::FileRead {
            path: self.path.clone(),
            source: e,
        })?;

        let mut raw = RawOptions::new();
        for line in content.lines() {
            let token = line.trim();
            if token.is_empty() {
                continue;
            }
            let (name, value) = parse_token(token)?;
            raw.push(name, value);
        }
        Ok(raw)
    }

    fn origin(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
