//! In-memory map source for programmatic and test construction.

use super::{OptionsSource, RawOptions, RawValue, SourceError};

/// Wraps a prebuilt name → value mapping.
///
/// Names are taken verbatim (no kebab-case normalization): programmatic
/// callers address declarations by their declared names. Typical uses are
/// embedding-level defaults below an argument source and test fixtures.
///
/// # Example
///
/// ```
/// use flowopts::source::MapSource;
///
/// let defaults = MapSource::new()
///     .with("runner", "local")
///     .with("blocking", "false");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    values: RawOptions,
}

impl MapSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single-occurrence value.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.set(name, RawValue::single(value));
        self
    }

    /// Adds a repeated-occurrence value, as if the flag were supplied once
    /// per item.
    #[must_use]
    pub fn with_many<I, T>(mut self, name: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.values.set(
            name,
            RawValue::Many(items.into_iter().map(Into::into).collect()),
        );
        self
    }
}

impl OptionsSource for MapSource {
    fn read(&self) -> Result<RawOptions, SourceError> {
        Ok(self.values.clone())
    }

    fn origin(&self) -> String {
        "map".to_string()
    }
}
