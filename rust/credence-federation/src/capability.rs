//! Caller capabilities.
//!
//! The host's object-ownership mechanism is abstracted as verified
//! credential structs: holding a capability *is* the authorization proof,
//! with possession vouched for by the host, and the engine only ever
//! compares the identifiers inside. Every operation checks that the
//! presented capability is bound to the federation it targets.

use crate::{EntityId, FederationId};
use serde::{Deserialize, Serialize};

/// Capability held by a root authority of a specific federation.
///
/// Bound to `(federation_id, account_id)`. Possession alone is not enough:
/// the account must also still be in the federation's active
/// root-authority list, so revocation takes effect immediately regardless
/// of who still holds the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootAuthorityCap {
    federation_id: FederationId,
    account_id: EntityId,
}

impl RootAuthorityCap {
    pub(crate) fn new(federation_id: FederationId, account_id: EntityId) -> Self {
        Self {
            federation_id,
            account_id,
        }
    }

    /// The federation this capability is bound to.
    #[must_use]
    pub const fn federation_id(&self) -> FederationId {
        self.federation_id
    }

    /// The account acting under this capability.
    #[must_use]
    pub const fn account_id(&self) -> &EntityId {
        &self.account_id
    }
}

/// Capability held by an accredited member of a federation.
///
/// Issued when an entity receives its first accreditation (or becomes a
/// root authority). Grants nothing by itself — the holder's actual rights
/// are looked up in the federation's accreditation maps on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccreditCap {
    federation_id: FederationId,
    account_id: EntityId,
}

impl AccreditCap {
    pub(crate) fn new(federation_id: FederationId, account_id: EntityId) -> Self {
        Self {
            federation_id,
            account_id,
        }
    }

    /// The federation this capability is bound to.
    #[must_use]
    pub const fn federation_id(&self) -> FederationId {
        self.federation_id
    }

    /// The account acting under this capability.
    #[must_use]
    pub const fn account_id(&self) -> &EntityId {
        &self.account_id
    }
}
