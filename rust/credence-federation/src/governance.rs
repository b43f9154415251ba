//! Governance state: the property catalogue and the delegation maps.

use crate::{AccreditationKind, Accreditations, EntityId};
use credence_property::{FederationProperty, PropertyName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The mutable trust state of a federation.
///
/// The delegation graph is deliberately flat: two arena-style maps from
/// entity id to that entity's [`Accreditations`], one per
/// [`AccreditationKind`]. Issuers are recorded per bundle as display
/// strings only; there are no back-links.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Governance {
    properties: BTreeMap<PropertyName, FederationProperty>,
    accreditations_to_accredit: BTreeMap<EntityId, Accreditations>,
    accreditations_to_attest: BTreeMap<EntityId, Accreditations>,
}

impl Governance {
    /// The property catalogue.
    #[must_use]
    pub const fn properties(&self) -> &BTreeMap<PropertyName, FederationProperty> {
        &self.properties
    }

    /// Inserts a catalogue entry, overwriting any prior entry of the same
    /// name.
    pub(crate) fn insert_property(&mut self, property: FederationProperty) {
        self.properties.insert(property.name().clone(), property);
    }

    /// Exact-name catalogue lookup.
    #[must_use]
    pub fn property(&self, name: &PropertyName) -> Option<&FederationProperty> {
        self.properties.get(name)
    }

    pub(crate) fn property_mut(&mut self, name: &PropertyName) -> Option<&mut FederationProperty> {
        self.properties.get_mut(name)
    }

    /// Catalogue entries whose name prefix-covers `name`.
    pub fn covering_properties<'a>(
        &'a self,
        name: &'a PropertyName,
    ) -> impl Iterator<Item = &'a FederationProperty> {
        self.properties
            .values()
            .filter(move |property| property.matches_name(name))
    }

    /// The accreditations an entity holds for the given kind, if any.
    #[must_use]
    pub fn accreditations(
        &self,
        kind: AccreditationKind,
        entity: &EntityId,
    ) -> Option<&Accreditations> {
        self.map_for(kind).get(entity)
    }

    pub(crate) fn accreditations_mut(
        &mut self,
        kind: AccreditationKind,
        entity: EntityId,
    ) -> &mut Accreditations {
        self.map_for_mut(kind).entry(entity).or_default()
    }

    /// Registers empty (but present) accreditation entries for an entity.
    pub(crate) fn register_entity(&mut self, entity: &EntityId) {
        self.accreditations_to_accredit
            .entry(entity.clone())
            .or_default();
        self.accreditations_to_attest
            .entry(entity.clone())
            .or_default();
    }

    /// Returns `true` if the entity appears in either delegation map.
    #[must_use]
    pub fn is_known(&self, entity: &EntityId) -> bool {
        self.accreditations_to_accredit.contains_key(entity)
            || self.accreditations_to_attest.contains_key(entity)
    }

    const fn map_for(&self, kind: AccreditationKind) -> &BTreeMap<EntityId, Accreditations> {
        match kind {
            AccreditationKind::ToAccredit => &self.accreditations_to_accredit,
            AccreditationKind::ToAttest => &self.accreditations_to_attest,
        }
    }

    fn map_for_mut(
        &mut self,
        kind: AccreditationKind,
    ) -> &mut BTreeMap<EntityId, Accreditations> {
        match kind {
            AccreditationKind::ToAccredit => &mut self.accreditations_to_accredit,
            AccreditationKind::ToAttest => &mut self.accreditations_to_attest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testresult::TestResult;

    #[test]
    fn inserting_a_property_overwrites_same_name() -> TestResult {
        let mut governance = Governance::default();
        governance.insert_property(
            FederationProperty::builder("deg").value("a").try_build()?,
        );
        governance.insert_property(
            FederationProperty::builder("deg").value("b").try_build()?,
        );

        let entry = governance.property(&PropertyName::from("deg")).unwrap();
        assert_eq!(entry.allowed_values().len(), 1);
        Ok(())
    }

    #[test]
    fn covering_properties_match_by_prefix() -> TestResult {
        let mut governance = Governance::default();
        governance.insert_property(
            FederationProperty::builder("university").value("x").try_build()?,
        );
        governance.insert_property(
            FederationProperty::builder("college").value("x").try_build()?,
        );

        let query = PropertyName::from("university.scores");
        let covering: Vec<_> = governance.covering_properties(&query).collect();
        assert_eq!(covering.len(), 1);
        assert_eq!(covering[0].name(), &PropertyName::from("university"));
        Ok(())
    }

    #[test]
    fn registered_entities_are_known_with_empty_holdings() {
        let mut governance = Governance::default();
        let alice = EntityId::from("alice");
        assert!(!governance.is_known(&alice));

        governance.register_entity(&alice);
        assert!(governance.is_known(&alice));
        assert!(
            governance
                .accreditations(AccreditationKind::ToAccredit, &alice)
                .unwrap()
                .is_empty()
        );
    }
}
