//! flowopts: a declarative, typed options registry for data-processing
//! pipeline runners.
//!
//! A pipeline declares the runtime options it accepts as composable
//! [`schema`] groups; the [`resolve`] engine merges argument vectors,
//! options files, and programmatic maps ([`source`]) into a typed
//! [`options::OptionsInstance`] by precedence; [`interchange`] serializes
//! instances to JSON job metadata, honoring per-field visibility. The
//! [`pipeline`] module carries the concrete option set the runner consumes.

pub mod interchange;
pub mod options;
pub mod pipeline;
pub mod resolve;
pub mod schema;
pub mod source;
