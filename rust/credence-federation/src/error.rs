//! Error taxonomy for mutating federation operations.
//!
//! Every mutating operation validates all of its preconditions before
//! touching any state and aborts on the first violation, so an `Err`
//! always means the federation is unchanged. Read-only validation queries
//! never raise; they fold every failure into a boolean `false`.

use crate::{AccreditationId, EntityId, FederationId};
use credence_property::{PropertyError, PropertyName};

/// Errors raised by mutating [`Federation`](crate::Federation) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FederationError {
    /// The presented capability is bound to a different federation.
    #[error("capability bound to federation {presented}, not {expected}")]
    WrongFederation {
        /// The federation the operation targeted.
        expected: FederationId,
        /// The federation the capability is bound to.
        presented: FederationId,
    },

    /// The acting root-authority capability belongs to a revoked account.
    #[error("root authority '{0}' has been revoked")]
    RevokedRootAuthority(EntityId),

    /// The account is not in the active root-authority list.
    #[error("'{0}' is not an active root authority")]
    RootAuthorityNotFound(EntityId),

    /// The account is already in the active root-authority list.
    #[error("'{0}' is already a root authority")]
    AlreadyRootAuthority(EntityId),

    /// The account is not in the revoked list, so there is nothing to
    /// reinstate.
    #[error("'{0}' is not a revoked root authority")]
    NotRevokedRootAuthority(EntityId),

    /// Removing this root authority would leave the federation without any.
    #[error("cannot revoke the last root authority")]
    CannotRevokeLastRootAuthority,

    /// No catalogue entry covers the referenced property name.
    #[error("property '{0}' is not part of the federation")]
    PropertyNotInFederation(PropertyName),

    /// The covering catalogue entry is outside its validity window.
    #[error("property '{0}' has been revoked")]
    PropertyRevoked(PropertyName),

    /// The caller's own grants do not dominate the requested grant or
    /// revocation.
    #[error("caller's accreditations do not cover the requested grant")]
    InsufficientAccreditation,

    /// No accreditation with the given id exists for that entity.
    #[error("accreditation {0} not found")]
    AccreditationNotFound(AccreditationId),

    /// A scheduled revocation instant is in the past or too close to now.
    #[error("revocation time {requested} must be at least {earliest}")]
    TimestampMustBeInTheFuture {
        /// The instant the caller asked for.
        requested: u64,
        /// The earliest acceptable instant (`now + buffer`).
        earliest: u64,
    },

    /// A property declaration was malformed.
    #[error(transparent)]
    Property(#[from] PropertyError),
}
