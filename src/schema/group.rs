//! Composable option groups and the flattened composed schema.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use super::decl::OptionDecl;
use super::error::SchemaError;

/// A named, composable set of option declarations.
///
/// Groups build the full configuration surface by set-union composition:
/// a group owns its declarations and may include other groups, and the
/// effective declaration set is the union of all of them. There is no
/// inheritance hierarchy and no ambient registry; the active groups are
/// whatever the caller composes and hands to the resolver.
///
/// Composition is acyclic. Groups are identified by name for cycle
/// detection, so a group can never include a group carrying its own name,
/// directly or transitively.
#[derive(Debug)]
pub struct OptionGroup {
    name: String,
    declarations: Vec<OptionDecl>,
    includes: Vec<OptionGroup>,
    composed: OnceLock<Arc<ComposedSchema>>,
}

impl OptionGroup {
    /// Creates an empty group.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declarations: Vec::new(),
            includes: Vec::new(),
            composed: OnceLock::new(),
        }
    }

    /// Returns the group's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the group's own declarations, excluding included groups.
    #[must_use]
    pub fn declarations(&self) -> &[OptionDecl] {
        &self.declarations
    }

    /// Registers a declaration in this group.
    ///
    /// # Errors
    ///
    /// Returns an error if the name already exists in this group, if the
    /// declaration's own invariants fail (enum default outside its domain,
    /// empty enum domain, default of the wrong kind), or if the group was
    /// already composed.
    pub fn declare(&mut self, decl: OptionDecl) -> Result<(), SchemaError> {
        self.ensure_unfrozen()?;
        decl.validate()?;

        if self.declarations.iter().any(|d| d.name == decl.name) {
            return Err(SchemaError::DuplicateName {
                name: decl.name,
                group: self.name.clone(),
            });
        }

        self.declarations.push(decl);
        Ok(())
    }

    /// Includes another group's declarations into this group.
    ///
    /// The included group is consumed; its declaration set becomes part of
    /// this group's effective set at composition time.
    ///
    /// # Errors
    ///
    /// Returns an error if the inclusion would create a cycle (the included
    /// group transitively carries this group's name) or if this group was
    /// already composed.
    pub fn include(&mut self, group: OptionGroup) -> Result<(), SchemaError> {
        self.ensure_unfrozen()?;

        if group.name == self.name || group.includes_name(&self.name) {
            return Err(SchemaError::CyclicInclude { group: group.name });
        }

        self.includes.push(group);
        Ok(())
    }

    /// Flattens the group into its effective declaration set.
    ///
    /// The first successful call computes and caches the schema; the group
    /// is frozen from then on, and every later call returns the same `Arc`.
    /// Included groups' declarations precede this group's own, in inclusion
    /// order.
    ///
    /// # Errors
    ///
    /// Returns an error if declaration names collide across the included
    /// groups or if a group name recurs along any inclusion path.
    pub fn compose(&self) -> Result<Arc<ComposedSchema>, SchemaError> {
        if let Some(schema) = self.composed.get() {
            return Ok(Arc::clone(schema));
        }

        let schema = Arc::new(self.flatten()?);
        Ok(Arc::clone(self.composed.get_or_init(|| schema)))
    }

    fn includes_name(&self, name: &str) -> bool {
        self.includes
            .iter()
            .any(|g| g.name == name || g.includes_name(name))
    }

    fn ensure_unfrozen(&self) -> Result<(), SchemaError> {
        if self.composed.get().is_some() {
            return Err(SchemaError::Frozen {
                group: self.name.clone(),
            });
        }
        Ok(())
    }

    fn flatten(&self) -> Result<ComposedSchema, SchemaError> {
        let mut declarations = Vec::new();
        let mut index = HashMap::new();
        let mut path = Vec::new();

        self.collect(&mut path, &mut declarations, &mut index)?;

        Ok(ComposedSchema {
            name: self.name.clone(),
            declarations,
            index,
        })
    }

    fn collect(
        &self,
        path: &mut Vec<String>,
        declarations: &mut Vec<OptionDecl>,
        index: &mut HashMap<String, usize>,
    ) -> Result<(), SchemaError> {
        if path.iter().any(|n| n == &self.name) {
            return Err(SchemaError::CyclicInclude {
                group: self.name.clone(),
            });
        }

        path.push(self.name.clone());

        for group in &self.includes {
            group.collect(path, declarations, index)?;
        }

        for decl in &self.declarations {
            if index.contains_key(&decl.name) {
                return Err(SchemaError::DuplicateName {
                    name: decl.name.clone(),
                    group: self.name.clone(),
                });
            }
            index.insert(decl.name.clone(), declarations.len());
            declarations.push(decl.clone());
        }

        path.pop();
        Ok(())
    }
}

// The compose cache is per-group state, not part of the group's identity;
// a clone starts unfrozen.
impl Clone for OptionGroup {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            declarations: self.declarations.clone(),
            includes: self.includes.clone(),
            composed: OnceLock::new(),
        }
    }
}

/// The flattened, validated declaration set of a composed group.
///
/// Read-only after construction; share it across threads via the `Arc`
/// returned by [`OptionGroup::compose`].
#[derive(Debug)]
pub struct ComposedSchema {
    name: String,
    declarations: Vec<OptionDecl>,
    index: HashMap<String, usize>,
}

impl ComposedSchema {
    /// Returns the composing group's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns all declarations in composition order.
    #[must_use]
    pub fn declarations(&self) -> &[OptionDecl] {
        &self.declarations
    }

    /// Looks up a declaration by name.
    #[must_use]
    pub fn declaration(&self, name: &str) -> Option<&OptionDecl> {
        self.index.get(name).map(|&i| &self.declarations[i])
    }

    /// Returns the number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns true if the schema declares nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}
