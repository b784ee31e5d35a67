//! The resolver: precedence merge, conversion, and batch validation.

use std::collections::HashMap;
use std::sync::Arc;

use crate::options::OptionsInstance;
use crate::schema::ComposedSchema;
use crate::source::{FileSource, OptionsSource, RawOptions};

use super::convert;
use super::error::{InvalidOptions, ResolveError};

/// Direction in which the source list is applied.
///
/// The order of the source list is the caller's; the direction makes the
/// override rule explicit instead of leaving it to convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Precedence {
    /// Later sources override earlier ones (default).
    #[default]
    LastWins,
    /// Earlier sources override later ones.
    FirstWins,
}

/// Merges source outputs into a typed [`OptionsInstance`].
///
/// # Example
///
/// ```
/// use flowopts::resolve::Resolver;
/// use flowopts::schema::{OptionDecl, OptionGroup};
/// use flowopts::source::{ArgsSource, MapSource};
///
/// let mut group = OptionGroup::new("pipeline");
/// group
///     .declare(OptionDecl::boolean("blocking", "Block on completion").with_default(false))
///     .unwrap();
/// let schema = group.compose().unwrap();
///
/// let defaults = MapSource::new().with("blocking", "false");
/// let args = ArgsSource::new(["--blocking=true"]);
///
/// let options = Resolver::new()
///     .resolve(&schema, &[&defaults, &args])
///     .unwrap();
/// assert!(options.get_bool("blocking"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    precedence: Precedence,
    options_file_key: Option<String>,
}

impl Resolver {
    /// Creates a resolver with last-wins precedence and no options-file
    /// indirection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the direction in which the source list is applied.
    #[must_use]
    pub fn with_precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = precedence;
        self
    }

    /// Enables options-file indirection through the named option.
    ///
    /// When the merged sources carry a non-empty value for `name`, the file
    /// at that path is read as a [`FileSource`] and merged UNDER everything
    /// else: explicitly supplied options always override file contents.
    /// One level only; a file naming a further options file is not
    /// followed.
    #[must_use]
    pub fn with_options_file_key(mut self, name: impl Into<String>) -> Self {
        self.options_file_key = Some(name.into());
        self
    }

    /// Resolves the sources against the schema.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Source`] immediately if any source cannot be
    /// read, and [`ResolveError::Invalid`] carrying every conversion and
    /// validation failure once all fields have been examined.
    pub fn resolve(
        &self,
        schema: &Arc<ComposedSchema>,
        sources: &[&dyn OptionsSource],
    ) -> Result<OptionsInstance, ResolveError> {
        let mut merged = RawOptions::new();

        match self.precedence {
            Precedence::LastWins => {
                for source in sources {
                    Self::merge_over(&mut merged, *source)?;
                }
            }
            Precedence::FirstWins => {
                for source in sources.iter().rev() {
                    Self::merge_over(&mut merged, *source)?;
                }
            }
        }

        self.merge_options_file(&mut merged)?;

        let mut values = HashMap::new();
        let mut extras = RawOptions::new();
        let mut issues = Vec::new();

        for (name, raw) in merged {
            match schema.declaration(&name) {
                Some(decl) => match convert::to_typed(decl, &raw) {
                    Ok(value) => {
                        values.insert(name, value);
                    }
                    Err(issue) => issues.push(issue),
                },
                None => {
                    tracing::debug!(option = %name, "passing through undeclared option");
                    extras.set(name, raw);
                }
            }
        }

        if !issues.is_empty() {
            return Err(ResolveError::Invalid(InvalidOptions { issues }));
        }

        Ok(OptionsInstance::from_parts(
            Arc::clone(schema),
            values,
            extras,
        ))
    }

    fn merge_over(merged: &mut RawOptions, source: &dyn OptionsSource) -> Result<(), ResolveError> {
        let raw = source.read()?;
        tracing::debug!(origin = %source.origin(), options = raw.len(), "read options source");
        merged.override_with(raw);
        Ok(())
    }

    fn merge_options_file(&self, merged: &mut RawOptions) -> Result<(), ResolveError> {
        let Some(ref key) = self.options_file_key else {
            return Ok(());
        };
        let Some(raw) = merged.get(key) else {
            return Ok(());
        };

        let path = raw.last().to_string();
        if path.is_empty() {
            return Ok(());
        }

        let file_options = FileSource::new(&path).read()?;
        tracing::debug!(%path, options = file_options.len(), "merged options file under explicit sources");
        merged.underlay(file_options);
        Ok(())
    }
}
