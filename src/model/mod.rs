//! Almanac data model.
//!
//! Two layers live here:
//! 1) the raw text-level view (`AlmanacSource`, `MappingBlock`, `RawElement`)
//!    produced by the parser, with spans and diagnostics for debugging, and
//! 2) the validated engine types (`Interval`, `MappingElement`, `Mapping`,
//!    `Almanac`) that the resolver works on.
//!
//! Engine types are immutable once built. Every value they hold lies in
//! `[0, DOMAIN_MAX]`, which is what lets interval arithmetic stay exact in
//! plain `i64` without overflow checks on the hot path.

mod almanac;
mod diagnostic;
mod element;
mod envelope;
mod interval;
mod mapping;
mod source;

pub use almanac::*;
pub use diagnostic::*;
pub use element::*;
pub use envelope::*;
pub use interval::*;
pub use mapping::*;
pub use source::*;

/// Exclusive upper bound of the value domain.
pub const DOMAIN_MAX: i64 = i64::MAX;

/// JSON schema version for the report envelope.
///
/// Bump this when making non-backwards-compatible changes to the JSON structure.
pub const SCHEMA_VERSION: u32 = 1;

/// The solver name stored in the JSON envelope.
pub const SOLVER_NAME: &str = "almanac";

/// The solver version stored in the JSON envelope.
pub const SOLVER_VERSION: &str = env!("CARGO_PKG_VERSION");
