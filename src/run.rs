//! Inspector command implementations.
//!
//! Each command is a pure function from parsed CLI input to printable
//! output, so the whole surface is testable without touching the process
//! environment.

use serde::Serialize;
use thiserror::Error;

use flowopts::interchange::{self, InterchangeError};
use flowopts::pipeline::{self, PipelineError, PipelineOptions};
use flowopts::schema::{OptionDecl, SchemaError};

use crate::cli::Format;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for inspector command failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Resolving pipeline options failed.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Rendering the interchange document failed.
    #[error(transparent)]
    Interchange(#[from] InterchangeError),

    /// Composing the pipeline schema failed.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Rendering the schema listing failed.
    #[error("Failed to render schema listing: {0}")]
    Render(#[from] serde_json::Error),
}

/// Resolves option tokens and renders the result.
///
/// # Errors
///
/// Returns an error if resolution fails or the output cannot be rendered.
pub fn resolve_output(tokens: &[String], format: Format) -> Result<String, RunError> {
    let options = PipelineOptions::from_args(tokens.iter().cloned())?;
    tracing::debug!(%options, "resolved pipeline options");

    match format {
        Format::Json => Ok(interchange::to_json_string(options.instance())?),
        Format::Table => Ok(render_values(&options)),
    }
}

/// Renders the composed pipeline schema.
///
/// # Errors
///
/// Returns an error if composition or rendering fails.
pub fn schema_output(format: Format) -> Result<String, RunError> {
    let schema = pipeline::pipeline_schema()?;

    match format {
        Format::Json => {
            let listing: Vec<DeclarationDoc<'_>> = schema
                .declarations()
                .iter()
                .map(DeclarationDoc::from)
                .collect();
            Ok(serde_json::to_string_pretty(&listing)?)
        }
        Format::Table => Ok(render_schema(schema.declarations())),
    }
}

/// One schema listing row, serialized for `schema --format json`.
#[derive(Debug, Serialize)]
struct DeclarationDoc<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    domain: Vec<&'a str>,
    visible: bool,
}

impl<'a> From<&'a OptionDecl> for DeclarationDoc<'a> {
    fn from(decl: &'a OptionDecl) -> Self {
        Self {
            name: &decl.name,
            kind: decl.kind.as_str(),
            description: &decl.description,
            default: decl.default.as_ref().map(ToString::to_string),
            domain: decl.domain.iter().map(String::as_str).collect(),
            visible: decl.visible,
        }
    }
}

fn render_values(options: &PipelineOptions) -> String {
    let instance = options.instance();
    let width = name_width(instance.schema().declarations());

    let mut out = String::new();
    for decl in instance.schema().declarations() {
        let value = instance
            .effective(&decl.name)
            .map(|v| v.to_string())
            .unwrap_or_default();
        let marker = if decl.visible { "" } else { "  (hidden)" };
        out.push_str(&format!("{:<width$}  {value}{marker}\n", decl.name));
    }
    out
}

fn render_schema(declarations: &[OptionDecl]) -> String {
    let width = name_width(declarations);

    let mut out = String::new();
    for decl in declarations {
        let default = decl
            .default
            .as_ref()
            .map(|d| format!(" [default: {d}]"))
            .unwrap_or_default();
        let hidden = if decl.visible { "" } else { " (hidden)" };
        out.push_str(&format!(
            "{:<width$}  {:<6}  {}{default}{hidden}\n",
            decl.name,
            decl.kind.as_str(),
            decl.description,
        ));
    }
    out
}

fn name_width(declarations: &[OptionDecl]) -> usize {
    declarations
        .iter()
        .map(|d| d.name.len())
        .max()
        .unwrap_or(0)
}
