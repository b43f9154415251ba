//! Trusted property primitives.
//!
//! A federation's trust catalogue is a set of *properties*: named, typed,
//! constrained attributes that entities may be authorized to claim. This
//! crate provides the building blocks for that catalogue:
//!
//! - [`PropertyName`] — a hierarchical dotted identifier with prefix
//!   coverage (`university` covers `university.scores.engineering`).
//! - [`PropertyValue`] — the atomic datum being claimed (text or number).
//! - [`PropertyShape`] — a predicate over values (substring position for
//!   text, strict comparison for numbers).
//! - [`Timespan`] — an optional validity window with a half-open upper
//!   bound.
//! - [`FederationProperty`] — binds a name to an admission rule (explicit
//!   value set, shape predicate, or allow-any) plus a validity window.
//!
//! Admission rules are evaluated with a fixed precedence: the validity
//! window gates everything, then allow-any accepts, then the shape is
//! tried, then explicit set membership. See
//! [`FederationProperty::matches_value`].
//!
//! Every time-sensitive check takes an externally supplied clock
//! (`now_ms`, milliseconds since epoch); the crate never reads wall-clock
//! time itself.

mod error;
pub use error::*;

mod name;
pub use name::*;

mod value;
pub use value::*;

mod shape;
pub use shape::*;

mod timespan;
pub use timespan::*;

mod property;
pub use property::*;
