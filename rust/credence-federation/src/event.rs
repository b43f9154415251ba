//! Event payloads returned by mutating operations.
//!
//! The engine does not emit events itself; every successful mutation
//! returns the payload that the host should publish to its audit trail.
//! All payloads carry the federation id so a single stream can multiplex
//! many federations.

use crate::{AccreditationId, AccreditationKind, EntityId, FederationId, RootAuthorityId};
use credence_property::PropertyName;
use serde::{Deserialize, Serialize};

/// A federation came into existence with its creator as sole root
/// authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederationCreated {
    /// The new federation.
    pub federation_id: FederationId,
    /// The creator, now the sole root authority.
    pub creator: EntityId,
}

/// A property was admitted into (or overwritten in) the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyAdded {
    /// The federation whose catalogue changed.
    pub federation_id: FederationId,
    /// The admitted property name.
    pub name: PropertyName,
}

/// A catalogue property's validity window was closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRevoked {
    /// The federation whose catalogue changed.
    pub federation_id: FederationId,
    /// The revoked property name.
    pub name: PropertyName,
    /// Instant (ms since epoch, exclusive) at which validity ends.
    pub valid_until_ms: u64,
}

/// An account joined the active root-authority list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootAuthorityAdded {
    /// The federation that gained a root authority.
    pub federation_id: FederationId,
    /// Identifier of the new root-authority entry.
    pub root_authority_id: RootAuthorityId,
    /// The account granted root authority.
    pub account_id: EntityId,
}

/// An account was removed from the active root-authority list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootAuthorityRevoked {
    /// The federation that lost a root authority.
    pub federation_id: FederationId,
    /// The revoked account.
    pub account_id: EntityId,
}

/// A previously revoked account regained root authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootAuthorityReinstated {
    /// The federation that regained a root authority.
    pub federation_id: FederationId,
    /// Identifier of the fresh root-authority entry.
    pub root_authority_id: RootAuthorityId,
    /// The reinstated account.
    pub account_id: EntityId,
}

/// An accreditation bundle was granted to an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccreditationCreated {
    /// The federation the grant belongs to.
    pub federation_id: FederationId,
    /// Whether the grant conveys accredit or attest rights.
    pub kind: AccreditationKind,
    /// Identifier of the new bundle.
    pub accreditation_id: AccreditationId,
    /// The issuing account.
    pub accredited_by: EntityId,
    /// The receiving account.
    pub receiver: EntityId,
}

/// An accreditation bundle was removed from an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccreditationRevoked {
    /// The federation the grant belonged to.
    pub federation_id: FederationId,
    /// Whether the bundle conveyed accredit or attest rights.
    pub kind: AccreditationKind,
    /// Identifier of the removed bundle.
    pub accreditation_id: AccreditationId,
    /// The entity that held the bundle.
    pub entity: EntityId,
}
