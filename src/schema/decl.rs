//! Single option declarations: name, kind, and metadata.

use std::fmt;

use super::error::SchemaError;

/// Default delimiter for list-valued options.
pub const DEFAULT_LIST_DELIMITER: char = ',';

/// Value kind of an option declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Free-form string, passed through unchanged.
    Str,
    /// Boolean, parsed case-insensitively from `"true"`/`"false"`.
    Bool,
    /// String restricted to an ordered domain of members.
    Enum,
    /// List of strings, split on a per-declaration delimiter.
    List,
}

impl OptionKind {
    /// Returns the kind's name as used in error messages and listings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Str => "string",
            Self::Bool => "bool",
            Self::Enum => "enum",
            Self::List => "list",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed option value.
///
/// `Enum` carries the matched domain member verbatim; domain membership is
/// enforced wherever values enter an instance (resolution, deserialization,
/// typed setters), never here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// A string value.
    Str(String),
    /// A boolean value.
    Bool(bool),
    /// An enum domain member.
    Enum(String),
    /// A list of strings.
    List(Vec<String>),
}

impl OptionValue {
    /// Returns the kind this value belongs to.
    #[must_use]
    pub const fn kind(&self) -> OptionKind {
        match self {
            Self::Str(_) => OptionKind::Str,
            Self::Bool(_) => OptionKind::Bool,
            Self::Enum(_) => OptionKind::Enum,
            Self::List(_) => OptionKind::List,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) | Self::Enum(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::List(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// A single named, typed option declaration.
///
/// Declarations are plain data built once at startup and registered into an
/// [`OptionGroup`](super::OptionGroup). The builder constructors are
/// infallible; invariants (enum default inside the domain, non-empty domain)
/// are checked when the declaration is registered.
///
/// # Example
///
/// ```
/// use flowopts::schema::OptionDecl;
///
/// let blocking = OptionDecl::boolean("blocking", "Block until the run completes")
///     .with_default(false);
/// let check = OptionDecl::enumeration(
///     "chained_joins",
///     "How aggressively to flag chained join stages",
///     ["OFF", "WARNING", "ERROR"],
/// )
/// .with_default("WARNING");
/// ```
#[derive(Debug, Clone)]
pub struct OptionDecl {
    /// Option name, unique across the fully composed schema.
    pub name: String,

    /// Value kind.
    pub kind: OptionKind,

    /// Human-readable description for listings and documentation.
    pub description: String,

    /// Default value applied when no source supplies one.
    pub default: Option<OptionValue>,

    /// Ordered enum domain; empty for non-enum kinds.
    pub domain: Vec<String>,

    /// Whether the field appears in external serialization.
    pub visible: bool,

    /// Item delimiter for list kinds.
    pub delimiter: char,
}

impl OptionDecl {
    fn new(name: impl Into<String>, kind: OptionKind, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            default: None,
            domain: Vec::new(),
            visible: true,
            delimiter: DEFAULT_LIST_DELIMITER,
        }
    }

    /// Declares a string option.
    #[must_use]
    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, OptionKind::Str, description)
    }

    /// Declares a boolean option.
    #[must_use]
    pub fn boolean(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, OptionKind::Bool, description)
    }

    /// Declares an enum option with an ordered domain of members.
    #[must_use]
    pub fn enumeration<I, S>(
        name: impl Into<String>,
        description: impl Into<String>,
        domain: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut decl = Self::new(name, OptionKind::Enum, description);
        decl.domain = domain.into_iter().map(Into::into).collect();
        decl
    }

    /// Declares a list-of-strings option.
    #[must_use]
    pub fn list(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, OptionKind::List, description)
    }

    /// Sets the default value.
    ///
    /// For enum declarations a string default is stored as an enum member;
    /// domain membership is verified at registration time.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<OptionValue>) -> Self {
        let value = match (self.kind, value.into()) {
            (OptionKind::Enum, OptionValue::Str(member)) => OptionValue::Enum(member),
            (_, value) => value,
        };
        self.default = Some(value);
        self
    }

    /// Excludes the field from external serialization.
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Overrides the item delimiter for a list declaration.
    #[must_use]
    pub const fn delimited_by(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Returns the kind-appropriate zero value.
    ///
    /// Unset, undefaulted fields read as this value: empty string, `false`,
    /// empty enum member, empty list.
    #[must_use]
    pub fn zero_value(&self) -> OptionValue {
        match self.kind {
            OptionKind::Str => OptionValue::Str(String::new()),
            OptionKind::Bool => OptionValue::Bool(false),
            OptionKind::Enum => OptionValue::Enum(String::new()),
            OptionKind::List => OptionValue::List(Vec::new()),
        }
    }

    /// Checks the declaration's internal invariants.
    ///
    /// Called by [`OptionGroup::declare`](super::OptionGroup::declare);
    /// not part of the public construction path.
    pub(crate) fn validate(&self) -> Result<(), SchemaError> {
        if self.kind == OptionKind::Enum && self.domain.is_empty() {
            return Err(SchemaError::EmptyDomain {
                name: self.name.clone(),
            });
        }

        if let Some(ref default) = self.default {
            if default.kind() != self.kind {
                return Err(SchemaError::DefaultKindMismatch {
                    name: self.name.clone(),
                    expected: self.kind,
                    actual: default.kind(),
                });
            }

            if let OptionValue::Enum(member) = default {
                if !self.domain.iter().any(|m| m == member) {
                    return Err(SchemaError::DefaultOutsideDomain {
                        name: self.name.clone(),
                        value: member.clone(),
                        domain: self.domain.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}
