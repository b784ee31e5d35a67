//! Resolved options instances: the typed configuration object.
//!
//! An [`OptionsInstance`] is what the resolver hands to the pipeline
//! runtime: a key-value store conforming to a composed schema, with typed
//! accessors. Reads are infallible — an unset field falls back to its
//! declaration's default, and an undefaulted one to the kind's zero value
//! (empty string, `false`, empty list) — because absence of a value is not
//! a failure condition. Writes are validated against the schema and fail
//! without partial effect.
//!
//! Instances are mutable through the typed setters until handed to the
//! pipeline; after that they are read-only by convention. The type does not
//! enforce the freeze, and concurrent mutation must be synchronized
//! externally by the caller.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::schema::{ComposedSchema, OptionKind, OptionValue};
use crate::source::RawOptions;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

/// Error type for instance mutation.
///
/// Fatal to the calling operation only; a failed set never corrupts the
/// instance.
#[derive(Debug, Error)]
pub enum InstanceError {
    /// The name is not declared in the instance's schema.
    #[error("Unknown option '{name}'")]
    UnknownOption {
        /// The undeclared name
        name: String,
    },

    /// The written value's kind differs from the declaration's.
    #[error("Option '{name}' is declared as {expected}, got a {actual} value")]
    TypeMismatch {
        /// The declaration name
        name: String,
        /// The declared kind
        expected: OptionKind,
        /// The written value's kind
        actual: OptionKind,
    },

    /// An enum write is outside the declared domain.
    #[error("Value '{value}' for enum option '{name}' is not in its domain [{}]", domain.join(", "))]
    UnknownEnumValue {
        /// The declaration name
        name: String,
        /// The rejected member
        value: String,
        /// The declared domain
        domain: Vec<String>,
    },
}

/// A resolved, typed configuration object conforming to a composed schema.
#[derive(Debug, Clone)]
pub struct OptionsInstance {
    schema: Arc<ComposedSchema>,
    values: HashMap<String, OptionValue>,
    extras: RawOptions,
}

impl OptionsInstance {
    /// Creates an instance with no values set.
    #[must_use]
    pub fn empty(schema: Arc<ComposedSchema>) -> Self {
        Self {
            schema,
            values: HashMap::new(),
            extras: RawOptions::new(),
        }
    }

    pub(crate) fn from_parts(
        schema: Arc<ComposedSchema>,
        values: HashMap<String, OptionValue>,
        extras: RawOptions,
    ) -> Self {
        Self {
            schema,
            values,
            extras,
        }
    }

    /// Returns the schema this instance conforms to.
    #[must_use]
    pub fn schema(&self) -> &Arc<ComposedSchema> {
        &self.schema
    }

    /// Returns true if the field was explicitly set (defaults don't count).
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the explicitly set value, ignoring defaults.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    /// Returns the effective value of a declared field: the set value,
    /// else the default, else the kind's zero value. `None` only for
    /// undeclared names.
    #[must_use]
    pub fn effective(&self, name: &str) -> Option<OptionValue> {
        let decl = self.schema.declaration(name)?;
        Some(
            self.values
                .get(name)
                .or(decl.default.as_ref())
                .cloned()
                .unwrap_or_else(|| decl.zero_value()),
        )
    }

    /// Raw values supplied by sources for names the schema does not
    /// declare, retained as opaque passthrough.
    #[must_use]
    pub fn extras(&self) -> &RawOptions {
        &self.extras
    }

    /// Reads a string field; `""` when unset and undefaulted.
    #[must_use]
    pub fn get_str(&self, name: &str) -> &str {
        match self.lookup(name, OptionKind::Str) {
            Some(OptionValue::Str(s)) => s,
            _ => "",
        }
    }

    /// Reads a boolean field; `false` when unset and undefaulted.
    #[must_use]
    pub fn get_bool(&self, name: &str) -> bool {
        match self.lookup(name, OptionKind::Bool) {
            Some(OptionValue::Bool(b)) => *b,
            _ => false,
        }
    }

    /// Reads an enum field; `""` when unset and undefaulted.
    #[must_use]
    pub fn get_enum(&self, name: &str) -> &str {
        match self.lookup(name, OptionKind::Enum) {
            Some(OptionValue::Enum(member)) => member,
            _ => "",
        }
    }

    /// Reads a list field; empty when unset and undefaulted.
    #[must_use]
    pub fn get_list(&self, name: &str) -> &[String] {
        match self.lookup(name, OptionKind::List) {
            Some(OptionValue::List(items)) => items,
            _ => &[],
        }
    }

    /// Writes a string field.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is undeclared or not a string field.
    pub fn set_str(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), InstanceError> {
        self.set(name, OptionValue::Str(value.into()))
    }

    /// Writes a boolean field.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is undeclared or not a boolean field.
    pub fn set_bool(&mut self, name: &str, value: bool) -> Result<(), InstanceError> {
        self.set(name, OptionValue::Bool(value))
    }

    /// Writes an enum field; the member must belong to the declared domain.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is undeclared, not an enum field, or
    /// the member is outside the domain.
    pub fn set_enum(
        &mut self,
        name: &str,
        member: impl Into<String>,
    ) -> Result<(), InstanceError> {
        self.set(name, OptionValue::Enum(member.into()))
    }

    /// Writes a list field.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is undeclared or not a list field.
    pub fn set_list(&mut self, name: &str, items: Vec<String>) -> Result<(), InstanceError> {
        self.set(name, OptionValue::List(items))
    }

    /// Writes a field with runtime type-tag validation against the schema.
    ///
    /// # Errors
    ///
    /// Returns an error for undeclared names, kind mismatches, and enum
    /// members outside the declared domain. Validation happens before any
    /// write, so a failed set leaves the instance unchanged.
    pub fn set(&mut self, name: &str, value: OptionValue) -> Result<(), InstanceError> {
        let decl =
            self.schema
                .declaration(name)
                .ok_or_else(|| InstanceError::UnknownOption {
                    name: name.to_string(),
                })?;

        if value.kind() != decl.kind {
            return Err(InstanceError::TypeMismatch {
                name: name.to_string(),
                expected: decl.kind,
                actual: value.kind(),
            });
        }

        if let OptionValue::Enum(ref member) = value {
            if !decl.domain.iter().any(|m| m == member) {
                return Err(InstanceError::UnknownEnumValue {
                    name: name.to_string(),
                    value: member.clone(),
                    domain: decl.domain.clone(),
                });
            }
        }

        self.values.insert(name.to_string(), value);
        Ok(())
    }

    fn lookup(&self, name: &str, kind: OptionKind) -> Option<&OptionValue> {
        let decl = self.schema.declaration(name)?;
        if decl.kind != kind {
            return None;
        }
        self.values.get(name).or(decl.default.as_ref())
    }
}
