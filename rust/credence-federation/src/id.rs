//! Identifier newtypes.
//!
//! Freshly minted ids use ULIDs; entity ids are opaque strings supplied by
//! the host (the role of ledger object ids) and are never interpreted.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use ulid::Ulid;

/// Globally unique identifier of a [`Federation`](crate::Federation).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FederationId(Ulid);

impl FederationId {
    /// Mints a fresh federation id.
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for FederationId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for FederationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Identifier of an [`Accreditation`](crate::Accreditation) bundle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AccreditationId(Ulid);

impl AccreditationId {
    /// Mints a fresh accreditation id.
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for AccreditationId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for AccreditationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Identifier of a [`RootAuthority`](crate::RootAuthority) entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RootAuthorityId(Ulid);

impl RootAuthorityId {
    /// Mints a fresh root-authority id.
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for RootAuthorityId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RootAuthorityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Opaque identifier of an entity (account) known to the host.
///
/// The engine treats entity ids as comparable keys and never inspects
/// their structure.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Borrow the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
