//! Configuration sources: readers that produce flat raw option maps.
//!
//! A source reads one place options can come from — an argument vector
//! ([`ArgsSource`]), a newline-delimited options file ([`FileSource`]), or a
//! prebuilt in-memory map ([`MapSource`]) — into a [`RawOptions`] mapping of
//! raw names to raw string values. Sources know nothing about the schema;
//! typing, validation, and precedence are the resolver's job.

mod args;
mod file;
mod map;

#[cfg(test)]
mod file_tests;

pub use args::ArgsSource;
pub use file::FileSource;
pub use map::MapSource;

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

/// A single place options can be read from.
pub trait OptionsSource {
    /// Reads the source into a flat raw-name → raw-value mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or contains malformed
    /// tokens. Source errors are fatal to resolution; an explicitly
    /// requested source that cannot be read is never silently skipped.
    fn read(&self) -> Result<RawOptions, SourceError>;

    /// Describes where the values come from, for logs and error context.
    fn origin(&self) -> String;
}

/// Error type for source reading.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to read the options file.
    #[error("Failed to read options file '{}': {source}", path.display())]
    FileRead {
        /// Path to the options file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A token is not of the form `--name=value` or `--name`.
    #[error("Invalid option token '{token}': expected --name=value or --name")]
    InvalidToken {
        /// The malformed token
        token: String,
    },
}

/// A raw option value as supplied by a source.
///
/// A flag that occurs once is `Single`; repeated occurrences within one
/// source accumulate into `Many`, preserving order. How multiplicity
/// collapses into a typed value is decided during conversion: list options
/// keep every occurrence, scalar options keep the last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// One occurrence.
    Single(String),
    /// Repeated occurrences, in supply order.
    Many(Vec<String>),
}

impl RawValue {
    /// Wraps a single occurrence.
    #[must_use]
    pub fn single(value: impl Into<String>) -> Self {
        Self::Single(value.into())
    }

    /// Appends another occurrence.
    pub fn push(&mut self, value: String) {
        match self {
            Self::Single(first) => {
                *self = Self::Many(vec![std::mem::take(first), value]);
            }
            Self::Many(items) => items.push(value),
        }
    }

    /// Returns the last occurrence, or `""` for an empty `Many`.
    #[must_use]
    pub fn last(&self) -> &str {
        match self {
            Self::Single(value) => value,
            Self::Many(items) => items.last().map_or("", String::as_str),
        }
    }

    /// Iterates over every occurrence in supply order.
    pub fn occurrences(&self) -> impl Iterator<Item = &str> {
        let items: &[String] = match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Many(items) => items,
        };
        items.iter().map(String::as_str)
    }
}

/// A flat mapping of raw option names to raw values, as read from one
/// source or merged across several.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOptions {
    values: BTreeMap<String, RawValue>,
}

impl RawOptions {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of `name`, accumulating repeats.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        match self.values.entry(name.into()) {
            std::collections::btree_map::Entry::Vacant(entry) => {
                entry.insert(RawValue::Single(value));
            }
            std::collections::btree_map::Entry::Occupied(mut entry) => {
                entry.get_mut().push(value);
            }
        }
    }

    /// Sets `name` to `value`, replacing any previous occurrences.
    pub fn set(&mut self, name: impl Into<String>, value: RawValue) {
        self.values.insert(name.into(), value);
    }

    /// Overrides this mapping with a higher-precedence one.
    ///
    /// Every name present in `higher` replaces this mapping's value for
    /// that name entirely; occurrences never merge across sources.
    pub fn override_with(&mut self, higher: Self) {
        for (name, value) in higher.values {
            self.values.insert(name, value);
        }
    }

    /// Fills in values from a lower-precedence mapping.
    ///
    /// Names already present here win; only unknown names are taken from
    /// `lower`.
    pub fn underlay(&mut self, lower: Self) {
        for (name, value) in lower.values {
            self.values.entry(name).or_insert(value);
        }
    }

    /// Looks up a raw value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.values.get(name)
    }

    /// Returns the number of distinct names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no names are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over (name, value) pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl IntoIterator for RawOptions {
    type Item = (String, RawValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, RawValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
