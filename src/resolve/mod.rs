//! Resolution: merging sources into a typed options instance.
//!
//! The resolver consults its sources in precedence order (later readers
//! override earlier ones by default, modeling "explicit command line
//! overrides options file overrides programmatic defaults"), converts raw
//! string values into typed values per the schema, validates enum domains,
//! and retains undeclared names as opaque passthrough values.
//!
//! Resolution is a single synchronous pass with no retries. Source failures
//! (an unreadable options file, a malformed token) abort immediately;
//! conversion and validation failures are collected across all fields and
//! reported together, so one run surfaces every misconfigured option.

mod convert;
mod error;
mod resolver;


pub use error::{InvalidOptions, ResolveError, ResolveIssue};
pub use resolver::{Precedence, Resolver};
