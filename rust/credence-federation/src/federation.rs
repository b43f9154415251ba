//! The federation aggregate and its public operations.

use crate::{
    AccreditCap, Accreditation, AccreditationId, AccreditationKind, Accreditations, EntityId,
    FederationError, FederationId, Governance, RootAuthorityCap, RootAuthorityId,
    event::{
        AccreditationCreated, AccreditationRevoked, FederationCreated, PropertyAdded,
        PropertyRevoked, RootAuthorityAdded, RootAuthorityReinstated, RootAuthorityRevoked,
    },
};
use credence_property::{FederationProperty, PropertyName, PropertyShape, PropertyValue};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Minimum distance between `now` and a scheduled property revocation.
///
/// Keeps in-flight transactions from racing a revocation that would take
/// effect at or before the instant they execute.
pub const REVOCATION_DELAY_BUFFER_MS: u64 = 60_000;

/// An active root-authority entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootAuthority {
    id: RootAuthorityId,
    account_id: EntityId,
}

impl RootAuthority {
    fn new(account_id: EntityId) -> Self {
        Self {
            id: RootAuthorityId::new(),
            account_id,
        }
    }

    /// Identifier of this entry.
    #[must_use]
    pub const fn id(&self) -> RootAuthorityId {
        self.id
    }

    /// The account holding root authority.
    #[must_use]
    pub const fn account_id(&self) -> &EntityId {
        &self.account_id
    }
}

/// Everything handed to the creator of a new federation.
#[derive(Debug, Clone)]
pub struct FederationGenesis {
    /// The creator's root-authority capability.
    pub root_authority_cap: RootAuthorityCap,
    /// The creator's member capability.
    pub accredit_cap: AccreditCap,
    /// Payload for the host's audit trail.
    pub event: FederationCreated,
}

/// Everything handed out when an account gains root authority.
#[derive(Debug, Clone)]
pub struct RootAuthorityGrant {
    /// The new authority's root capability.
    pub root_authority_cap: RootAuthorityCap,
    /// The new authority's member capability.
    pub accredit_cap: AccreditCap,
    /// Payload for the host's audit trail.
    pub event: RootAuthorityAdded,
}

/// A named trust domain: property catalogue, root authorities, and the
/// delegation graph.
///
/// All mutation goes through the public operations below. Each operation
/// validates every precondition before touching state, so an `Err` leaves
/// the federation exactly as it was.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Federation {
    id: FederationId,
    governance: Governance,
    root_authorities: Vec<RootAuthority>,
    revoked_root_authorities: Vec<EntityId>,
}

impl Federation {
    /// Creates a federation with `creator` as its sole root authority.
    ///
    /// The creator is registered in both delegation maps with empty (but
    /// present) holdings and receives both capability kinds.
    #[must_use]
    pub fn new(creator: EntityId) -> (Self, FederationGenesis) {
        let id = FederationId::new();
        let mut governance = Governance::default();
        governance.register_entity(&creator);

        let federation = Self {
            id,
            governance,
            root_authorities: vec![RootAuthority::new(creator.clone())],
            revoked_root_authorities: Vec::new(),
        };
        debug!(federation = %id, creator = %creator, "federation created");

        let genesis = FederationGenesis {
            root_authority_cap: RootAuthorityCap::new(id, creator.clone()),
            accredit_cap: AccreditCap::new(id, creator.clone()),
            event: FederationCreated {
                federation_id: id,
                creator,
            },
        };
        (federation, genesis)
    }

    /// Identifier of this federation.
    #[must_use]
    pub const fn id(&self) -> FederationId {
        self.id
    }

    /// Read access to the governance state.
    #[must_use]
    pub const fn governance(&self) -> &Governance {
        &self.governance
    }

    /// The active root-authority list.
    #[must_use]
    pub fn root_authorities(&self) -> &[RootAuthority] {
        &self.root_authorities
    }

    /// Accounts whose root authority has been revoked.
    #[must_use]
    pub fn revoked_root_authorities(&self) -> &[EntityId] {
        &self.revoked_root_authorities
    }

    /// Returns `true` iff the account is an active, non-revoked root
    /// authority.
    #[must_use]
    pub fn is_root_authority(&self, account_id: &EntityId) -> bool {
        if self.revoked_root_authorities.contains(account_id) {
            return false;
        }
        self.is_active_root_authority(account_id)
    }

    /// Returns `true` if the entity holds at least one accredit-rights
    /// bundle.
    #[must_use]
    pub fn is_accreditor(&self, entity: &EntityId) -> bool {
        self.governance
            .accreditations(AccreditationKind::ToAccredit, entity)
            .is_some_and(|held| !held.is_empty())
    }

    /// Returns `true` if the entity holds at least one attest-rights
    /// bundle.
    #[must_use]
    pub fn is_attester(&self, entity: &EntityId) -> bool {
        self.governance
            .accreditations(AccreditationKind::ToAttest, entity)
            .is_some_and(|held| !held.is_empty())
    }

    /// The accreditations an entity holds for the given kind (audit
    /// surface).
    #[must_use]
    pub fn accreditations_of(
        &self,
        kind: AccreditationKind,
        entity: &EntityId,
    ) -> Option<&Accreditations> {
        self.governance.accreditations(kind, entity)
    }

    // ------------------------------------------------------------------
    // Catalogue operations (active root authorities only)
    // ------------------------------------------------------------------

    /// Admits a property with an explicit value set or allow-any rule,
    /// overwriting any prior entry of the same name.
    pub fn add_property(
        &mut self,
        cap: &RootAuthorityCap,
        name: impl Into<PropertyName>,
        allowed_values: BTreeSet<PropertyValue>,
        allow_any: bool,
    ) -> Result<PropertyAdded, FederationError> {
        self.check_root_cap(cap)?;

        let mut builder = FederationProperty::builder(name).values(allowed_values);
        if allow_any {
            builder = builder.allow_any();
        }
        let property = builder.try_build()?;
        self.admit_property(property)
    }

    /// Admits a shape-constrained property, overwriting any prior entry of
    /// the same name.
    pub fn add_shaped_property(
        &mut self,
        cap: &RootAuthorityCap,
        name: impl Into<PropertyName>,
        shape: PropertyShape,
    ) -> Result<PropertyAdded, FederationError> {
        self.check_root_cap(cap)?;

        let property = FederationProperty::builder(name).shape(shape).try_build()?;
        self.admit_property(property)
    }

    /// Closes a catalogue property's validity window at `at_ms`.
    pub fn revoke_property(
        &mut self,
        cap: &RootAuthorityCap,
        name: &PropertyName,
        at_ms: u64,
    ) -> Result<PropertyRevoked, FederationError> {
        self.check_root_cap(cap)?;

        let property = self
            .governance
            .property_mut(name)
            .ok_or_else(|| FederationError::PropertyNotInFederation(name.clone()))?;
        property.revoke(at_ms);
        debug!(federation = %self.id, property = %name, at_ms, "property revoked");

        Ok(PropertyRevoked {
            federation_id: self.id,
            name: name.clone(),
            valid_until_ms: at_ms,
        })
    }

    /// Schedules a property revocation at `future_ms`, which must be at
    /// least [`REVOCATION_DELAY_BUFFER_MS`] beyond `now_ms`.
    pub fn revoke_property_at(
        &mut self,
        cap: &RootAuthorityCap,
        name: &PropertyName,
        future_ms: u64,
        now_ms: u64,
    ) -> Result<PropertyRevoked, FederationError> {
        self.check_root_cap(cap)?;

        let earliest = now_ms.saturating_add(REVOCATION_DELAY_BUFFER_MS);
        if future_ms < earliest {
            return Err(FederationError::TimestampMustBeInTheFuture {
                requested: future_ms,
                earliest,
            });
        }
        self.revoke_property(cap, name, future_ms)
    }

    // ------------------------------------------------------------------
    // Root-authority lifecycle (active root authorities only)
    // ------------------------------------------------------------------

    /// Grants root authority to an account.
    ///
    /// A revoked account cannot come back through this path;
    /// [`reinstate_root_authority`](Self::reinstate_root_authority) is the
    /// only transition out of the revoked state.
    pub fn add_root_authority(
        &mut self,
        cap: &RootAuthorityCap,
        account_id: EntityId,
    ) -> Result<RootAuthorityGrant, FederationError> {
        self.check_root_cap(cap)?;

        if self.revoked_root_authorities.contains(&account_id) {
            return Err(FederationError::RevokedRootAuthority(account_id));
        }
        if self.is_active_root_authority(&account_id) {
            return Err(FederationError::AlreadyRootAuthority(account_id));
        }

        let entry = RootAuthority::new(account_id.clone());
        let root_authority_id = entry.id();
        self.root_authorities.push(entry);
        self.governance.register_entity(&account_id);
        debug!(federation = %self.id, account = %account_id, "root authority added");

        Ok(RootAuthorityGrant {
            root_authority_cap: RootAuthorityCap::new(self.id, account_id.clone()),
            accredit_cap: AccreditCap::new(self.id, account_id.clone()),
            event: RootAuthorityAdded {
                federation_id: self.id,
                root_authority_id,
                account_id,
            },
        })
    }

    /// Permanently revokes an account's root authority.
    ///
    /// Takes effect immediately: any capability token the account still
    /// holds stops passing the root-authority checks.
    pub fn revoke_root_authority(
        &mut self,
        cap: &RootAuthorityCap,
        account_id: &EntityId,
    ) -> Result<RootAuthorityRevoked, FederationError> {
        self.check_root_cap(cap)?;

        let position = self
            .root_authorities
            .iter()
            .position(|authority| authority.account_id() == account_id)
            .ok_or_else(|| FederationError::RootAuthorityNotFound(account_id.clone()))?;
        if self.root_authorities.len() == 1 {
            return Err(FederationError::CannotRevokeLastRootAuthority);
        }

        self.root_authorities.remove(position);
        self.revoked_root_authorities.push(account_id.clone());
        debug!(federation = %self.id, account = %account_id, "root authority revoked");

        Ok(RootAuthorityRevoked {
            federation_id: self.id,
            account_id: account_id.clone(),
        })
    }

    /// Moves a revoked account back into the active root-authority list.
    pub fn reinstate_root_authority(
        &mut self,
        cap: &RootAuthorityCap,
        account_id: EntityId,
    ) -> Result<(RootAuthorityReinstated, RootAuthorityCap), FederationError> {
        self.check_root_cap(cap)?;

        if self.is_active_root_authority(&account_id) {
            return Err(FederationError::AlreadyRootAuthority(account_id));
        }
        let position = self
            .revoked_root_authorities
            .iter()
            .position(|revoked| revoked == &account_id)
            .ok_or_else(|| FederationError::NotRevokedRootAuthority(account_id.clone()))?;

        self.revoked_root_authorities.remove(position);
        let entry = RootAuthority::new(account_id.clone());
        let root_authority_id = entry.id();
        self.root_authorities.push(entry);
        debug!(federation = %self.id, account = %account_id, "root authority reinstated");

        Ok((
            RootAuthorityReinstated {
                federation_id: self.id,
                root_authority_id,
                account_id: account_id.clone(),
            },
            RootAuthorityCap::new(self.id, account_id),
        ))
    }

    // ------------------------------------------------------------------
    // Accreditation operations
    // ------------------------------------------------------------------

    /// Grants accredit rights (rights to further delegate) to `receiver`.
    ///
    /// Root authorities grant unconditionally; everyone else must already
    /// hold accredit rights dominating the requested properties. Returns a
    /// fresh [`AccreditCap`] alongside the event when this is the
    /// receiver's first grant of either kind.
    pub fn create_accreditation_to_accredit(
        &mut self,
        cap: &AccreditCap,
        receiver: EntityId,
        properties: Vec<FederationProperty>,
        now_ms: u64,
    ) -> Result<(AccreditationCreated, Option<AccreditCap>), FederationError> {
        self.create_accreditation(AccreditationKind::ToAccredit, cap, receiver, properties, now_ms)
    }

    /// Grants attest rights (rights to make claims) to `receiver`.
    ///
    /// Authorization is identical to
    /// [`create_accreditation_to_accredit`](Self::create_accreditation_to_accredit):
    /// the caller's *accredit* holdings must dominate the request.
    pub fn create_accreditation_to_attest(
        &mut self,
        cap: &AccreditCap,
        receiver: EntityId,
        properties: Vec<FederationProperty>,
        now_ms: u64,
    ) -> Result<(AccreditationCreated, Option<AccreditCap>), FederationError> {
        self.create_accreditation(AccreditationKind::ToAttest, cap, receiver, properties, now_ms)
    }

    /// Revokes an accredit-rights bundle held by `entity`.
    pub fn revoke_accreditation_to_accredit(
        &mut self,
        cap: &AccreditCap,
        entity: &EntityId,
        accreditation_id: AccreditationId,
        now_ms: u64,
    ) -> Result<AccreditationRevoked, FederationError> {
        self.revoke_accreditation(
            AccreditationKind::ToAccredit,
            cap,
            entity,
            accreditation_id,
            now_ms,
        )
    }

    /// Revokes an attest-rights bundle held by `entity`.
    pub fn revoke_accreditation_to_attest(
        &mut self,
        cap: &AccreditCap,
        entity: &EntityId,
        accreditation_id: AccreditationId,
        now_ms: u64,
    ) -> Result<AccreditationRevoked, FederationError> {
        self.revoke_accreditation(
            AccreditationKind::ToAttest,
            cap,
            entity,
            accreditation_id,
            now_ms,
        )
    }

    // ------------------------------------------------------------------
    // Validation (read-only, never raises)
    // ------------------------------------------------------------------

    /// Is `attester` currently authorized to claim `value` for `name`?
    ///
    /// True iff some catalogue entry covering `name` is currently valid
    /// and the attester's attest holdings allow the exact claim. Every
    /// failure mode folds into `false`; external verifiers cannot
    /// distinguish "unknown" from "not permitted" from "expired".
    #[must_use]
    pub fn validate_property(
        &self,
        attester: &EntityId,
        name: &PropertyName,
        value: &PropertyValue,
        now_ms: u64,
    ) -> bool {
        let catalogue_valid = self
            .governance
            .covering_properties(name)
            .any(|declared| declared.is_valid_at(now_ms));
        if !catalogue_valid {
            return false;
        }
        self.governance
            .accreditations(AccreditationKind::ToAttest, attester)
            .is_some_and(|held| held.is_property_allowed(name, value, now_ms))
    }

    /// AND of [`validate_property`](Self::validate_property) over every
    /// claim. Vacuously true for an empty map.
    #[must_use]
    pub fn validate_properties(
        &self,
        attester: &EntityId,
        claims: &BTreeMap<PropertyName, PropertyValue>,
        now_ms: u64,
    ) -> bool {
        claims
            .iter()
            .all(|(name, value)| self.validate_property(attester, name, value, now_ms))
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn admit_property(
        &mut self,
        property: FederationProperty,
    ) -> Result<PropertyAdded, FederationError> {
        let name = property.name().clone();
        self.governance.insert_property(property);
        debug!(federation = %self.id, property = %name, "property admitted");
        Ok(PropertyAdded {
            federation_id: self.id,
            name,
        })
    }

    fn create_accreditation(
        &mut self,
        kind: AccreditationKind,
        cap: &AccreditCap,
        receiver: EntityId,
        properties: Vec<FederationProperty>,
        now_ms: u64,
    ) -> Result<(AccreditationCreated, Option<AccreditCap>), FederationError> {
        self.check_accredit_cap(cap)?;
        self.check_catalogue(&properties, now_ms)?;

        if !self.is_root_authority(cap.account_id()) {
            let compliant = self
                .governance
                .accreditations(AccreditationKind::ToAccredit, cap.account_id())
                .is_some_and(|held| held.are_properties_compliant(&properties, now_ms));
            if !compliant {
                return Err(FederationError::InsufficientAccreditation);
            }
        }

        let first_grant = !self.governance.is_known(&receiver);
        let accreditation = Accreditation::new(cap.account_id().as_str(), properties);
        let accreditation_id = accreditation.id();
        self.governance.register_entity(&receiver);
        self.governance
            .accreditations_mut(kind, receiver.clone())
            .push(accreditation);
        debug!(
            federation = %self.id,
            receiver = %receiver,
            %accreditation_id,
            ?kind,
            "accreditation granted"
        );

        let event = AccreditationCreated {
            federation_id: self.id,
            kind,
            accreditation_id,
            accredited_by: cap.account_id().clone(),
            receiver: receiver.clone(),
        };
        let receiver_cap = first_grant.then(|| AccreditCap::new(self.id, receiver));
        Ok((event, receiver_cap))
    }

    fn revoke_accreditation(
        &mut self,
        kind: AccreditationKind,
        cap: &AccreditCap,
        entity: &EntityId,
        accreditation_id: AccreditationId,
        now_ms: u64,
    ) -> Result<AccreditationRevoked, FederationError> {
        self.check_accredit_cap(cap)?;

        let target_properties: Vec<FederationProperty> = self
            .governance
            .accreditations(kind, entity)
            .and_then(|held| held.get_by_id(accreditation_id))
            .map(|accreditation| accreditation.properties().values().cloned().collect())
            .ok_or(FederationError::AccreditationNotFound(accreditation_id))?;

        // You may only revoke what you could equally grant.
        if !self.is_root_authority(cap.account_id()) {
            let compliant = self
                .governance
                .accreditations(AccreditationKind::ToAccredit, cap.account_id())
                .is_some_and(|held| held.are_properties_compliant(&target_properties, now_ms));
            if !compliant {
                return Err(FederationError::InsufficientAccreditation);
            }
        }

        self.governance
            .accreditations_mut(kind, entity.clone())
            .remove_by_id(accreditation_id);
        debug!(
            federation = %self.id,
            entity = %entity,
            %accreditation_id,
            ?kind,
            "accreditation revoked"
        );

        Ok(AccreditationRevoked {
            federation_id: self.id,
            kind,
            accreditation_id,
            entity: entity.clone(),
        })
    }

    /// Every requested property must be covered by some catalogue entry,
    /// and at least one covering entry must be currently valid.
    fn check_catalogue(
        &self,
        properties: &[FederationProperty],
        now_ms: u64,
    ) -> Result<(), FederationError> {
        for property in properties {
            let mut covering = self.governance.covering_properties(property.name()).peekable();
            if covering.peek().is_none() {
                return Err(FederationError::PropertyNotInFederation(
                    property.name().clone(),
                ));
            }
            if !covering.any(|declared| declared.is_valid_at(now_ms)) {
                return Err(FederationError::PropertyRevoked(property.name().clone()));
            }
        }
        Ok(())
    }

    fn is_active_root_authority(&self, account_id: &EntityId) -> bool {
        self.root_authorities
            .iter()
            .any(|authority| authority.account_id() == account_id)
    }

    fn check_root_cap(&self, cap: &RootAuthorityCap) -> Result<(), FederationError> {
        if cap.federation_id() != self.id {
            return Err(FederationError::WrongFederation {
                expected: self.id,
                presented: cap.federation_id(),
            });
        }
        if self.revoked_root_authorities.contains(cap.account_id()) {
            return Err(FederationError::RevokedRootAuthority(cap.account_id().clone()));
        }
        if !self.is_active_root_authority(cap.account_id()) {
            return Err(FederationError::RootAuthorityNotFound(cap.account_id().clone()));
        }
        Ok(())
    }

    fn check_accredit_cap(&self, cap: &AccreditCap) -> Result<(), FederationError> {
        if cap.federation_id() != self.id {
            return Err(FederationError::WrongFederation {
                expected: self.id,
                presented: cap.federation_id(),
            });
        }
        Ok(())
    }
}
