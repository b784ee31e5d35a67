//! Option schema: typed declarations and composable groups.
//!
//! This module provides:
//! - Single option declarations ([`OptionDecl`]) with kind, description,
//!   default, enum domain, and serialization visibility
//! - Composable option groups ([`OptionGroup`]) with duplicate-name and
//!   inclusion-cycle detection
//! - Flattened, validated schemas ([`ComposedSchema`]) cached on first
//!   successful composition
//!
//! # Lifecycle
//!
//! Groups are built at process startup: declare fields, include other
//! groups, then call [`OptionGroup::compose`]. Composition flattens the
//! inclusion graph into one declaration set, validates it, and freezes the
//! group; later `declare`/`include` calls fail with [`SchemaError::Frozen`].
//! The composed schema is shared via `Arc` and is safe to read from multiple
//! threads without synchronization.

mod decl;
mod error;
mod group;


pub use decl::{DEFAULT_LIST_DELIMITER, OptionDecl, OptionKind, OptionValue};
pub use error::SchemaError;
pub use group::{ComposedSchema, OptionGroup};
