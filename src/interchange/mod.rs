//! JSON interchange: serializing instances for job metadata.
//!
//! The interchange document is a flat JSON object keyed by declaration
//! name, with JSON-native value representations: string, bool, string for
//! enums, array-of-string for lists.
//!
//! Visibility is enforced in both directions. Fields declared hidden never
//! appear in output, set or not, and are ignored on input even when present
//! — a round-tripped document must not smuggle a hidden value back in.
//!
//! Round-trip law: for any resolver-produced instance,
//! [`from_external`]`(`[`to_external`]`(i))` reproduces every visible
//! field's effective value exactly; hidden fields are lost by design.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::options::OptionsInstance;
use crate::resolve::{InvalidOptions, ResolveIssue};
use crate::schema::{ComposedSchema, OptionDecl, OptionKind, OptionValue};
use crate::source::{RawOptions, RawValue};

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

/// Error type for interchange parsing.
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// The document's top level is not a JSON object.
    #[error("Interchange document must be a JSON object")]
    NotAnObject,

    /// The document could not be read or written as JSON.
    #[error("Interchange JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// One or more values failed conversion or validation; same batch
    /// reporting as the resolver.
    #[error(transparent)]
    Invalid(#[from] InvalidOptions),
}

/// Serializes an instance to an interchange document.
///
/// Emits one key per visible declaration with an effective value — set
/// explicitly or by default. Hidden declarations are always omitted,
/// completely unset undefaulted ones too, and passthrough extras are not
/// declarations so they never appear.
#[must_use]
pub fn to_external(instance: &OptionsInstance) -> Map<String, Value> {
    let mut document = Map::new();

    for decl in instance.schema().declarations() {
        if !decl.visible {
            continue;
        }
        let value = instance.value(&decl.name).or(decl.default.as_ref());
        if let Some(value) = value {
            document.insert(decl.name.clone(), value_to_json(value));
        }
    }

    document
}

/// Serializes an instance to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if the document cannot be rendered.
pub fn to_json_string(instance: &OptionsInstance) -> Result<String, InterchangeError> {
    Ok(serde_json::to_string_pretty(&Value::Object(to_external(
        instance,
    )))?)
}

/// Deserializes an interchange document against a schema.
///
/// Applies the resolver's per-kind conversion rules to JSON values. Keys of
/// hidden declarations are silently ignored even when present; unknown keys
/// become passthrough extras.
///
/// # Errors
///
/// Returns every conversion and validation failure together, as the
/// resolver does.
pub fn from_external(
    document: &Map<String, Value>,
    schema: &Arc<ComposedSchema>,
) -> Result<OptionsInstance, InterchangeError> {
    let mut values = HashMap::new();
    let mut extras = RawOptions::new();
    let mut issues = Vec::new();

    for (key, json) in document {
        match schema.declaration(key) {
            Some(decl) if !decl.visible => {
                tracing::debug!(option = %key, "ignoring hidden option in interchange input");
            }
            Some(decl) => match json_to_value(decl, json) {
                Ok(value) => {
                    values.insert(key.clone(), value);
                }
                Err(issue) => issues.push(issue),
            },
            None => {
                extras.set(key.clone(), json_to_raw(json));
            }
        }
    }

    if !issues.is_empty() {
        return Err(InterchangeError::Invalid(InvalidOptions { issues }));
    }

    Ok(OptionsInstance::from_parts(
        Arc::clone(schema),
        values,
        extras,
    ))
}

/// Deserializes an interchange document from a JSON string.
///
/// # Errors
///
/// Returns an error for invalid JSON, a non-object top level, or any
/// conversion/validation failure.
pub fn from_json_str(
    document: &str,
    schema: &Arc<ComposedSchema>,
) -> Result<OptionsInstance, InterchangeError> {
    let value: Value = serde_json::from_str(document)?;
    let object = value.as_object().ok_or(InterchangeError::NotAnObject)?;
    from_external(object, schema)
}

fn value_to_json(value: &OptionValue) -> Value {
    match value {
        OptionValue::Str(s) | OptionValue::Enum(s) => Value::String(s.clone()),
        OptionValue::Bool(b) => Value::Bool(*b),
        OptionValue::List(items) => Value::Array(
            items
                .iter()
                .map(|item| Value::String(item.clone()))
                .collect(),
        ),
    }
}

fn json_to_value(decl: &OptionDecl, json: &Value) -> Result<OptionValue, ResolveIssue> {
    let mismatch = || ResolveIssue::Conversion {
        name: decl.name.clone(),
        value: json.to_string(),
        expected: decl.kind,
    };

    match decl.kind {
        OptionKind::Str => match json {
            Value::String(s) => Ok(OptionValue::Str(s.clone())),
            _ => Err(mismatch()),
        },
        OptionKind::Bool => match json {
            Value::Bool(b) => Ok(OptionValue::Bool(*b)),
            Value::String(s) => match s.to_ascii_lowercase().as_str() {
                "true" => Ok(OptionValue::Bool(true)),
                "false" => Ok(OptionValue::Bool(false)),
                _ => Err(mismatch()),
            },
            _ => Err(mismatch()),
        },
        OptionKind::Enum => match json {
            Value::String(member) => {
                if decl.domain.iter().any(|m| m == member) {
                    Ok(OptionValue::Enum(member.clone()))
                } else {
                    Err(ResolveIssue::UnknownEnumValue {
                        name: decl.name.clone(),
                        value: member.clone(),
                        domain: decl.domain.clone(),
                    })
                }
            }
            _ => Err(mismatch()),
        },
        OptionKind::List => match json {
            Value::Array(elements) => {
                let mut items = Vec::with_capacity(elements.len());
                for element in elements {
                    match element {
                        Value::String(s) => items.push(s.clone()),
                        _ => return Err(mismatch()),
                    }
                }
                Ok(OptionValue::List(items))
            }
            // a delimited string parses the way the resolver parses it
            Value::String(s) => Ok(OptionValue::List(
                s.split(decl.delimiter)
                    .map(str::trim)
                    .filter(|segment| !segment.is_empty())
                    .map(str::to_string)
                    .collect(),
            )),
            _ => Err(mismatch()),
        },
    }
}

fn json_to_raw(json: &Value) -> RawValue {
    match json {
        Value::String(s) => RawValue::single(s.clone()),
        Value::Array(elements) => RawValue::Many(
            elements
                .iter()
                .map(|element| match element {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
        ),
        other => RawValue::single(other.to_string()),
    }
}
