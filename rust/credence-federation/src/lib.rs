//! Hierarchical trust-delegation and claim-validation engine.
//!
//! A [`Federation`] is a named trust domain. A small set of *root
//! authorities* maintains a catalogue of trusted properties and delegates,
//! transitively, the rights to further delegate ("accredit") and to make
//! authoritative claims ("attest") about those properties.
//!
//! Verification asks: is entity X currently authorized, through some
//! unbroken delegation chain rooted at a root authority, to claim property
//! P has value V?
//!
//! # Overview
//!
//! The flow of authority:
//!
//! 1. A federation is created; its creator is the sole root authority.
//! 2. Root authorities admit properties into the catalogue and grant
//!    [`Accreditation`] bundles unconditionally (the trust anchor).
//! 3. Accredited entities grant further accreditations, but only within
//!    their own granted rights — the *compliance* check in
//!    [`Accreditations`] ensures a delegated grant never exceeds the
//!    delegator's grant.
//! 4. Anyone validates claims with [`Federation::validate_property`], a
//!    pure predicate that folds every failure mode into `false`.
//!
//! Callers prove themselves by presenting a capability struct
//! ([`RootAuthorityCap`] or [`AccreditCap`]) that the host has verified
//! possession of; the engine only compares identifiers. Every
//! time-sensitive operation takes an externally supplied `now_ms` clock,
//! so the engine is deterministic and never reads wall-clock time.
//!
//! Mutating operations take `&mut Federation` and validate all
//! preconditions before touching any state; the host is responsible for
//! serializing mutations (single-writer). Each returns an event payload
//! from [`event`] that the host may emit for audit trails.

mod error;
pub use error::*;

mod id;
pub use id::*;

mod capability;
pub use capability::*;

pub mod event;

mod accreditation;
pub use accreditation::*;

mod governance;
pub use governance::*;

mod federation;
pub use federation::*;
