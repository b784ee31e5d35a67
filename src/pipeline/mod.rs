//! The pipeline runner's concrete option set.
//!
//! Everything in this module is data filled into the schema machinery: the
//! option groups a pipeline run accepts, composed into one schema, and a
//! typed facade ([`PipelineOptions`]) the runtime reads instead of touching
//! the generic accessors.
//!
//! There is no ambient registry: the active groups are whatever
//! [`runner_group`] composes, built fresh for each caller.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::options::OptionsInstance;
use crate::resolve::{ResolveError, Resolver};
use crate::schema::{ComposedSchema, OptionDecl, OptionGroup, SchemaError};
use crate::source::ArgsSource;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

/// Well-known option names.
///
/// Use these constants instead of string literals when reading or writing
/// pipeline options programmatically.
pub mod names {
    /// Name of the pipeline job.
    pub const JOB_NAME: &str = "job_name";
    /// Runner to execute the pipeline with.
    pub const RUNNER: &str = "runner";
    /// Path for temporary files.
    pub const TEMP_LOCATION: &str = "temp_location";

    /// Serialization buffer size for the record codec.
    pub const CODEC_BUFFER_SIZE: &str = "codec_buffer_size";
    /// Reference tracking during record encoding.
    pub const CODEC_REFERENCE_TRACKING: &str = "codec_reference_tracking";
    /// Whether codec registration is required for record types.
    pub const CODEC_REGISTRATION_REQUIRED: &str = "codec_registration_required";

    /// Run-identifying pipeline version string.
    pub const PIPELINE_VERSION: &str = "pipeline_version";
    /// Toolchain version the pipeline was built with.
    pub const RUNTIME_VERSION: &str = "runtime_version";
    /// File or folder to save metrics to.
    pub const METRICS_LOCATION: &str = "metrics_location";
    /// File or folder to save lineage to.
    pub const LINEAGE_LOCATION: &str = "lineage_location";
    /// Whether to block until the run completes.
    pub const BLOCKING: &str = "blocking";
    /// How long to block for job completion.
    pub const BLOCK_FOR: &str = "block_for";
    /// Free-form application arguments.
    pub const APP_ARGUMENTS: &str = "app_arguments";
    /// Path to a newline-separated file with command line options.
    pub const OPTIONS_FILE: &str = "options_file";
    /// How aggressively to flag chained join stages.
    pub const CHAINED_JOINS: &str = "chained_joins";
    /// Whether record encoders accept missing values.
    pub const NULLABLE_ENCODING: &str = "nullable_encoding";
    /// Dictionary mappings for the compression codec.
    pub const ZSTD_DICTIONARY: &str = "zstd_dictionary";
}

/// Error type for building pipeline options.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The pipeline schema failed to compose.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Resolution against the pipeline schema failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Strictness of a validation check: disabled, warn, or hard error.
///
/// An unrecognized level in input is a resolution error, never silently
/// ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckLevel {
    /// Check disabled.
    Off,
    /// Flag the pattern, keep running.
    #[default]
    Warning,
    /// Fail the run on the pattern.
    Error,
}

impl CheckLevel {
    /// The enum domain, in declaration order.
    pub const DOMAIN: [&'static str; 3] = ["OFF", "WARNING", "ERROR"];

    /// Returns the domain member for this level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }

    fn from_member(member: &str) -> Option<Self> {
        match member {
            "OFF" => Some(Self::Off),
            "WARNING" => Some(Self::Warning),
            "ERROR" => Some(Self::Error),
            _ => None,
        }
    }
}

impl fmt::Display for CheckLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base options every pipeline run carries.
///
/// # Errors
///
/// Returns an error if the declarations are inconsistent.
pub fn base_group() -> Result<OptionGroup, SchemaError> {
    let mut group = OptionGroup::new("pipeline");
    group.declare(OptionDecl::string(
        names::JOB_NAME,
        "Name of the pipeline job",
    ))?;
    group.declare(OptionDecl::string(
        names::RUNNER,
        "Runner to execute the pipeline with",
    ))?;
    group.declare(OptionDecl::string(
        names::TEMP_LOCATION,
        "Path for temporary files and intermediate results",
    ))?;
    Ok(group)
}

/// Options configuring the record codec.
///
/// The codec itself lives outside this crate; these values are only carried
/// and typed here.
///
/// # Errors
///
/// Returns an error if the declarations are inconsistent.
pub fn codec_group() -> Result<OptionGroup, SchemaError> {
    let mut group = OptionGroup::new("codec");
    group.declare(OptionDecl::string(
        names::CODEC_BUFFER_SIZE,
        "Serialization buffer size for the record codec",
    ))?;
    group.declare(
        OptionDecl::boolean(
            names::CODEC_REFERENCE_TRACKING,
            "Track shared references when encoding object graphs",
        )
        .with_default(false),
    )?;
    group.declare(
        OptionDecl::boolean(
            names::CODEC_REGISTRATION_REQUIRED,
            "Require explicit codec registration for record types",
        )
        .with_default(false),
    )?;
    Ok(group)
}

/// The runner's own options, composed with [`base_group`] and
/// [`codec_group`].
///
/// # Errors
///
/// Returns an error if the declarations are inconsistent or the groups
/// collide.
pub fn runner_group() -> Result<OptionGroup, SchemaError> {
    let mut group = OptionGroup::new("runner");
    group.include(base_group()?)?;
    group.include(codec_group()?)?;

    group.declare(OptionDecl::string(
        names::PIPELINE_VERSION,
        "Pipeline runner version recorded in job metadata",
    ))?;
    group.declare(OptionDecl::string(
        names::RUNTIME_VERSION,
        "Toolchain version the pipeline was built with",
    ))?;
    group.declare(OptionDecl::string(
        names::METRICS_LOCATION,
        "Filename or folder to save metrics to",
    ))?;
    group.declare(OptionDecl::string(
        names::LINEAGE_LOCATION,
        "Filename or folder to save lineage to",
    ))?;
    group.declare(
        OptionDecl::boolean(names::BLOCKING, "Block until the pipeline run completes")
            .with_default(false),
    )?;
    group.declare(OptionDecl::string(
        names::BLOCK_FOR,
        "Time period to block for job completion, as a duration string",
    ))?;
    group.declare(OptionDecl::string(
        names::APP_ARGUMENTS,
        "Custom application arguments",
    ))?;
    group.declare(
        OptionDecl::string(
            names::OPTIONS_FILE,
            "Path to a newline-separated file with command line options",
        )
        .hidden(),
    )?;
    group.declare(
        OptionDecl::enumeration(
            names::CHAINED_JOINS,
            "Whether to check for chained join stages",
            CheckLevel::DOMAIN,
        )
        .with_default(CheckLevel::Warning.as_str()),
    )?;
    group.declare(
        OptionDecl::boolean(
            names::NULLABLE_ENCODING,
            "Whether record encoders accept missing values",
        )
        .with_default(false),
    )?;
    group.declare(
        OptionDecl::list(
            names::ZSTD_DICTIONARY,
            "Mapping of record type to location of the Zstd dictionary for \
             that type, as type:location pairs",
        )
        .delimited_by('|'),
    )?;

    Ok(group)
}

/// Composes the full pipeline schema.
///
/// # Errors
///
/// Returns an error if composition fails.
pub fn pipeline_schema() -> Result<Arc<ComposedSchema>, SchemaError> {
    runner_group()?.compose()
}

/// Typed facade over a resolved pipeline options instance.
///
/// The runtime reads these named accessors instead of addressing the
/// generic instance by string name. The facade adds no setters: once
/// options reach the pipeline they are read-only by convention.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    instance: OptionsInstance,
}

impl PipelineOptions {
    /// Resolves pipeline options from argument tokens.
    ///
    /// Options-file indirection is active: a `--options_file=PATH` token
    /// merges the file's options under the explicit arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema fails to compose, a source cannot be
    /// read, or any value fails conversion or validation.
    pub fn from_args<I, T>(args: I) -> Result<Self, PipelineError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let schema = pipeline_schema()?;
        let source = ArgsSource::new(args);
        let instance = Resolver::new()
            .with_options_file_key(names::OPTIONS_FILE)
            .resolve(&schema, &[&source])?;
        Ok(Self { instance })
    }

    /// Wraps an already resolved instance.
    #[must_use]
    pub fn from_instance(instance: OptionsInstance) -> Self {
        Self { instance }
    }

    /// Returns the underlying instance.
    #[must_use]
    pub fn instance(&self) -> &OptionsInstance {
        &self.instance
    }

    /// Unwraps into the underlying instance.
    #[must_use]
    pub fn into_instance(self) -> OptionsInstance {
        self.instance
    }

    /// Name of the pipeline job.
    #[must_use]
    pub fn job_name(&self) -> &str {
        self.instance.get_str(names::JOB_NAME)
    }

    /// Runner to execute the pipeline with.
    #[must_use]
    pub fn runner(&self) -> &str {
        self.instance.get_str(names::RUNNER)
    }

    /// Path for temporary files.
    #[must_use]
    pub fn temp_location(&self) -> &str {
        self.instance.get_str(names::TEMP_LOCATION)
    }

    /// Run-identifying pipeline version string.
    #[must_use]
    pub fn pipeline_version(&self) -> &str {
        self.instance.get_str(names::PIPELINE_VERSION)
    }

    /// Toolchain version the pipeline was built with.
    #[must_use]
    pub fn runtime_version(&self) -> &str {
        self.instance.get_str(names::RUNTIME_VERSION)
    }

    /// File or folder to save metrics to.
    #[must_use]
    pub fn metrics_location(&self) -> &str {
        self.instance.get_str(names::METRICS_LOCATION)
    }

    /// File or folder to save lineage to.
    #[must_use]
    pub fn lineage_location(&self) -> &str {
        self.instance.get_str(names::LINEAGE_LOCATION)
    }

    /// Whether to block until the run completes.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.instance.get_bool(names::BLOCKING)
    }

    /// How long to block for job completion, as a duration string.
    #[must_use]
    pub fn block_for(&self) -> &str {
        self.instance.get_str(names::BLOCK_FOR)
    }

    /// Free-form application arguments.
    #[must_use]
    pub fn app_arguments(&self) -> &str {
        self.instance.get_str(names::APP_ARGUMENTS)
    }

    /// Path to the options file this run was resolved through, if any.
    #[must_use]
    pub fn options_file(&self) -> &str {
        self.instance.get_str(names::OPTIONS_FILE)
    }

    /// How aggressively the lint layer flags chained join stages.
    #[must_use]
    pub fn chained_joins(&self) -> CheckLevel {
        CheckLevel::from_member(self.instance.get_enum(names::CHAINED_JOINS))
            .unwrap_or_default()
    }

    /// Whether record encoders accept missing values.
    #[must_use]
    pub fn nullable_encoding(&self) -> bool {
        self.instance.get_bool(names::NULLABLE_ENCODING)
    }

    /// Dictionary mappings for the compression codec, as `type:location`
    /// pairs.
    #[must_use]
    pub fn zstd_dictionary(&self) -> &[String] {
        self.instance.get_list(names::ZSTD_DICTIONARY)
    }

    /// Serialization buffer size for the record codec.
    #[must_use]
    pub fn codec_buffer_size(&self) -> &str {
        self.instance.get_str(names::CODEC_BUFFER_SIZE)
    }

    /// Whether the codec tracks shared references.
    #[must_use]
    pub fn codec_reference_tracking(&self) -> bool {
        self.instance.get_bool(names::CODEC_REFERENCE_TRACKING)
    }

    /// Whether codec registration is required for record types.
    #[must_use]
    pub fn codec_registration_required(&self) -> bool {
        self.instance.get_bool(names::CODEC_REGISTRATION_REQUIRED)
    }
}

impl fmt::Display for PipelineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let or_dash = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };

        write!(
            f,
            "PipelineOptions {{ job: {}, runner: {}, blocking: {}, block_for: {}, \
             chained_joins: {}, nullable_encoding: {}, dictionaries: {} }}",
            or_dash(self.job_name()),
            or_dash(self.runner()),
            self.is_blocking(),
            or_dash(self.block_for()),
            self.chained_joins(),
            self.nullable_encoding(),
            self.zstd_dictionary().len(),
        )
    }
}
