//! Per-kind conversion of raw string values into typed values.

use crate::schema::{OptionDecl, OptionKind, OptionValue};
use crate::source::RawValue;

use super::error::ResolveIssue;

/// Converts a raw value to the declaration's kind.
///
/// Multiplicity rules: list options keep every occurrence of a repeated
/// flag (each occurrence split on the declaration's delimiter, in order);
/// scalar options keep the last occurrence, consistent with
/// later-overrides-earlier merging.
pub(super) fn to_typed(decl: &OptionDecl, raw: &RawValue) -> Result<OptionValue, ResolveIssue> {
    match decl.kind {
        OptionKind::Str => Ok(OptionValue::Str(raw.last().to_string())),
        OptionKind::Bool => parse_bool(decl, raw.last()),
        OptionKind::Enum => parse_enum(decl, raw.last()),
        OptionKind::List => Ok(OptionValue::List(split_list(raw, decl.delimiter))),
    }
}

/// Case-insensitive `"true"`/`"false"`; anything else is a conversion error.
fn parse_bool(decl: &OptionDecl, raw: &str) -> Result<OptionValue, ResolveIssue> {
    match raw.to_ascii_lowercase().as_str() {
        "true" => Ok(OptionValue::Bool(true)),
        "false" => Ok(OptionValue::Bool(false)),
        _ => Err(ResolveIssue::Conversion {
            name: decl.name.clone(),
            value: raw.to_string(),
            expected: OptionKind::Bool,
        }),
    }
}

/// Case-sensitive domain match; an unrecognized member is a hard error,
/// not silently ignored.
fn parse_enum(decl: &OptionDecl, raw: &str) -> Result<OptionValue, ResolveIssue> {
    if decl.domain.iter().any(|m| m == raw) {
        Ok(OptionValue::Enum(raw.to_string()))
    } else {
        Err(ResolveIssue::UnknownEnumValue {
            name: decl.name.clone(),
            value: raw.to_string(),
            domain: decl.domain.clone(),
        })
    }
}

/// Splits each occurrence on the delimiter, trimming and dropping empty
/// segments.
fn split_list(raw: &RawValue, delimiter: char) -> Vec<String> {
    raw.occurrences()
        .flat_map(|occurrence| occurrence.split(delimiter))
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
