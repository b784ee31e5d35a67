//! Error types for schema construction and composition.

use thiserror::Error;

use super::decl::OptionKind;

/// Error type for schema construction.
///
/// All variants are fatal at schema-build time: a schema that fails to
/// construct is never partially usable.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// An option name occurs more than once in the composed declaration set.
    #[error("Duplicate option '{name}' in group '{group}'")]
    DuplicateName {
        /// The colliding option name
        name: String,
        /// The group where the collision surfaced
        group: String,
    },

    /// Including the group would make it (transitively) include itself.
    #[error("Including group '{group}' would create an inclusion cycle")]
    CyclicInclude {
        /// The group whose inclusion closes the cycle
        group: String,
    },

    /// An enum declaration's default is not a member of its domain.
    #[error("Default '{value}' for enum option '{name}' is not in its domain [{}]", domain.join(", "))]
    DefaultOutsideDomain {
        /// The declaration name
        name: String,
        /// The offending default
        value: String,
        /// The declared domain
        domain: Vec<String>,
    },

    /// An enum declaration has no domain members.
    #[error("Enum option '{name}' declares an empty domain")]
    EmptyDomain {
        /// The declaration name
        name: String,
    },

    /// A declaration's default value has a different kind than the declaration.
    #[error("Default for option '{name}' is a {actual} value, expected {expected}")]
    DefaultKindMismatch {
        /// The declaration name
        name: String,
        /// The declared kind
        expected: OptionKind,
        /// The default's actual kind
        actual: OptionKind,
    },

    /// The group was mutated after a successful composition.
    #[error("Group '{group}' is frozen: it was already composed")]
    Frozen {
        /// The frozen group's name
        group: String,
    },
}
