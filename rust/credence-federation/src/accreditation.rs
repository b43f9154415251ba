//! Accreditation bundles and the compliance engine.
//!
//! An [`Accreditation`] is an immutable bundle of property grants issued by
//! one entity to another at a point in time. [`Accreditations`] is the
//! per-entity collection of bundles together with the two checks everything
//! else rests on:
//!
//! - *allowance* ([`Accreditations::is_property_allowed`]) — may this
//!   entity claim value V for property P right now?
//! - *compliance* ([`Accreditations::is_property_compliant`]) — do this
//!   entity's own grants dominate a grant it wants to hand out?

use crate::AccreditationId;
use credence_property::{FederationProperty, PropertyName, PropertyValue};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;

/// The two independent kinds of delegated rights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccreditationKind {
    /// Rights to further delegate (issue accreditations).
    ToAccredit,

    /// Rights to make authoritative claims.
    ToAttest,
}

/// An immutable bundle of property grants.
///
/// Created only by [`Federation`](crate::Federation) operations and
/// destroyed only by an explicit revoke. Property names within a bundle are
/// unique; a later grant of the same name in the same request overwrites
/// the earlier one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accreditation {
    id: AccreditationId,
    accredited_by: String,
    properties: BTreeMap<PropertyName, FederationProperty>,
}

impl Accreditation {
    pub(crate) fn new(
        accredited_by: impl Into<String>,
        properties: impl IntoIterator<Item = FederationProperty>,
    ) -> Self {
        Self {
            id: AccreditationId::new(),
            accredited_by: accredited_by.into(),
            properties: properties
                .into_iter()
                .map(|property| (property.name().clone(), property))
                .collect(),
        }
    }

    /// Identifier of this bundle.
    #[must_use]
    pub const fn id(&self) -> AccreditationId {
        self.id
    }

    /// Display identity of the issuer.
    #[must_use]
    pub fn accredited_by(&self) -> &str {
        &self.accredited_by
    }

    /// The granted properties, keyed by name.
    #[must_use]
    pub const fn properties(&self) -> &BTreeMap<PropertyName, FederationProperty> {
        &self.properties
    }
}

/// The ordered collection of accreditation bundles held by one entity for
/// one [`AccreditationKind`].
///
/// Grows by append, shrinks by id-based removal. All queries are logical
/// ORs across every bundle ever accumulated, including bundles from
/// different issuers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Accreditations {
    entries: Vec<Accreditation>,
}

impl Accreditations {
    pub(crate) fn push(&mut self, accreditation: Accreditation) {
        self.entries.push(accreditation);
    }

    /// Iterates over the held bundles in grant order.
    pub fn iter(&self) -> impl Iterator<Item = &Accreditation> {
        self.entries.iter()
    }

    /// Number of held bundles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no bundle is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Linear scan for the position of a bundle by id.
    #[must_use]
    pub fn find_by_id(&self, id: AccreditationId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id() == id)
    }

    /// Looks up a bundle by id.
    #[must_use]
    pub fn get_by_id(&self, id: AccreditationId) -> Option<&Accreditation> {
        self.find_by_id(id).map(|index| &self.entries[index])
    }

    /// Removes a whole bundle by id. No-op when absent.
    pub fn remove_by_id(&mut self, id: AccreditationId) -> Option<Accreditation> {
        self.find_by_id(id).map(|index| self.entries.remove(index))
    }

    /// Returns `true` if some held bundle grants `value` for exactly
    /// `name` at `now_ms`.
    ///
    /// Lookup is by exact key: a bundle was built with the exact names its
    /// issuer chose to grant, so no prefix matching happens here. The
    /// granted property itself may still admit the value via its shape or
    /// allow-any rule.
    #[must_use]
    pub fn is_property_allowed(
        &self,
        name: &PropertyName,
        value: &PropertyValue,
        now_ms: u64,
    ) -> bool {
        self.entries.iter().any(|accreditation| {
            accreditation
                .properties()
                .get(name)
                .is_some_and(|property| property.matches_name_value(name, value, now_ms))
        })
    }

    /// AND of [`is_property_allowed`](Self::is_property_allowed) over every
    /// entry of `claims`. Vacuously true for an empty request.
    #[must_use]
    pub fn are_properties_allowed(
        &self,
        claims: &BTreeMap<PropertyName, PropertyValue>,
        now_ms: u64,
    ) -> bool {
        claims
            .iter()
            .all(|(name, value)| self.is_property_allowed(name, value, now_ms))
    }

    /// The delegation-narrowing check: may the holder of these bundles
    /// hand out `requested` to someone else?
    ///
    /// Name matching here uses prefix semantics, so a broader owned grant
    /// on `university` satisfies a narrower requested grant on
    /// `university.scores`.
    ///
    /// Explicit requested values are drained against every owned grant on
    /// a covering name; the request is compliant once every value has been
    /// matched. An unbounded request (allow-any or shape-bearing) is only
    /// compliant when some currently valid owned grant on a covering name
    /// is itself allow-any or carries the identical shape: a holder of a
    /// finite value set can never issue an unbounded grant.
    #[must_use]
    pub fn is_property_compliant(&self, requested: &FederationProperty, now_ms: u64) -> bool {
        if (requested.is_allow_any() || requested.shape().is_some())
            && !self.covers_unbounded(requested, now_ms)
        {
            trace!(
                property = %requested.name(),
                "unbounded grant request without a covering unbounded accreditation"
            );
            return false;
        }

        let mut want: BTreeSet<&PropertyValue> = requested.allowed_values().iter().collect();
        if want.is_empty() {
            return true;
        }

        for accreditation in &self.entries {
            for owned in accreditation.properties().values() {
                if !owned.matches_name(requested.name()) {
                    continue;
                }
                want.retain(|&value| !owned.matches_value(value, now_ms));

                if want.is_empty() {
                    return true;
                }
            }
        }

        trace!(
            property = %requested.name(),
            outstanding = want.len(),
            "grant request exceeds the caller's accreditations"
        );
        false
    }

    /// AND of [`is_property_compliant`](Self::is_property_compliant) over
    /// the list. Vacuously true for an empty request.
    #[must_use]
    pub fn are_properties_compliant(
        &self,
        requested: &[FederationProperty],
        now_ms: u64,
    ) -> bool {
        requested
            .iter()
            .all(|property| self.is_property_compliant(property, now_ms))
    }

    fn covers_unbounded(&self, requested: &FederationProperty, now_ms: u64) -> bool {
        self.entries.iter().any(|accreditation| {
            accreditation.properties().values().any(|owned| {
                owned.matches_name(requested.name())
                    && owned.is_valid_at(now_ms)
                    && (owned.is_allow_any()
                        || (!requested.is_allow_any() && owned.shape() == requested.shape()))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credence_property::PropertyShape;
    use testresult::TestResult;

    fn granted(properties: Vec<FederationProperty>) -> Accreditations {
        let mut accreditations = Accreditations::default();
        accreditations.push(Accreditation::new("issuer", properties));
        accreditations
    }

    fn values_property(name: &str, values: &[u64]) -> FederationProperty {
        FederationProperty::builder(name)
            .values(values.iter().copied())
            .try_build()
            .unwrap()
    }

    #[test]
    fn allowance_uses_exact_name_lookup() -> TestResult {
        let held = granted(vec![
            FederationProperty::builder("university").value("x").try_build()?,
        ]);

        let exact = PropertyName::from("university");
        let deeper = PropertyName::from("university.scores");
        assert!(held.is_property_allowed(&exact, &PropertyValue::from("x"), 0));
        assert!(!held.is_property_allowed(&deeper, &PropertyValue::from("x"), 0));
        Ok(())
    }

    #[test]
    fn allowance_ors_across_bundles() -> TestResult {
        let mut held = granted(vec![values_property("score", &[1])]);
        held.push(Accreditation::new(
            "other-issuer",
            vec![values_property("score", &[2])],
        ));

        let name = PropertyName::from("score");
        assert!(held.is_property_allowed(&name, &PropertyValue::from(1), 0));
        assert!(held.is_property_allowed(&name, &PropertyValue::from(2), 0));
        assert!(!held.is_property_allowed(&name, &PropertyValue::from(3), 0));
        Ok(())
    }

    #[test]
    fn allowance_over_map_is_vacuously_true_when_empty() {
        let held = Accreditations::default();
        assert!(held.are_properties_allowed(&BTreeMap::new(), 0));
    }

    #[test]
    fn subset_grants_are_compliant() -> TestResult {
        let held = granted(vec![values_property("score", &[1, 2, 3])]);

        let subset = values_property("score", &[1, 3]);
        let superset = values_property("score", &[1, 4]);
        assert!(held.is_property_compliant(&subset, 0));
        assert!(!held.is_property_compliant(&superset, 0));
        Ok(())
    }

    #[test]
    fn compliance_uses_prefix_name_coverage() -> TestResult {
        let held = granted(vec![
            FederationProperty::builder("university")
                .value("accredited")
                .try_build()?,
        ]);

        let narrower = FederationProperty::builder("university.scores")
            .value("accredited")
            .try_build()?;
        assert!(held.is_property_compliant(&narrower, 0));
        Ok(())
    }

    #[test]
    fn wanted_values_drain_across_bundles() -> TestResult {
        let mut held = granted(vec![values_property("score", &[1])]);
        held.push(Accreditation::new(
            "other-issuer",
            vec![values_property("score", &[2])],
        ));

        let request = values_property("score", &[1, 2]);
        assert!(held.is_property_compliant(&request, 0));
        Ok(())
    }

    #[test]
    fn expired_grants_do_not_satisfy_compliance() -> TestResult {
        let mut property = values_property("score", &[1]);
        property.revoke(1000);
        let held = granted(vec![property]);

        let request = values_property("score", &[1]);
        assert!(held.is_property_compliant(&request, 999));
        assert!(!held.is_property_compliant(&request, 1000));
        Ok(())
    }

    #[test]
    fn allow_any_request_needs_an_allow_any_grant() -> TestResult {
        let finite = granted(vec![values_property("score", &[1, 2, 3])]);
        let unbounded = granted(vec![FederationProperty::allow_any("score")]);

        let request = FederationProperty::allow_any("score.engineering");
        assert!(!finite.is_property_compliant(&request, 0));
        assert!(unbounded.is_property_compliant(&request, 0));
        Ok(())
    }

    #[test]
    fn shape_request_needs_identical_shape_or_allow_any() -> TestResult {
        let same_shape = granted(vec![
            FederationProperty::builder("score")
                .shape(PropertyShape::GreaterThan(50))
                .try_build()?,
        ]);
        let other_shape = granted(vec![
            FederationProperty::builder("score")
                .shape(PropertyShape::GreaterThan(60))
                .try_build()?,
        ]);
        let unbounded = granted(vec![FederationProperty::allow_any("score")]);

        let request = FederationProperty::builder("score")
            .shape(PropertyShape::GreaterThan(50))
            .try_build()?;
        assert!(same_shape.is_property_compliant(&request, 0));
        assert!(!other_shape.is_property_compliant(&request, 0));
        assert!(unbounded.is_property_compliant(&request, 0));
        Ok(())
    }

    #[test]
    fn shape_grant_satisfies_explicit_value_requests() -> TestResult {
        let held = granted(vec![
            FederationProperty::builder("score")
                .shape(PropertyShape::GreaterThan(50))
                .try_build()?,
        ]);

        let inside = values_property("score", &[51, 99]);
        let outside = values_property("score", &[51, 50]);
        assert!(held.is_property_compliant(&inside, 0));
        assert!(!held.is_property_compliant(&outside, 0));
        Ok(())
    }

    #[test]
    fn compliance_over_list_is_vacuously_true_when_empty() {
        let held = Accreditations::default();
        assert!(held.are_properties_compliant(&[], 0));
    }

    #[test]
    fn empty_holdings_are_never_compliant_with_a_grant() -> TestResult {
        let held = Accreditations::default();
        let request = values_property("score", &[1]);
        assert!(!held.is_property_compliant(&request, 0));
        Ok(())
    }

    #[test]
    fn removal_by_id_deletes_the_whole_bundle() -> TestResult {
        let mut held = granted(vec![values_property("score", &[1, 2])]);
        let id = held.iter().next().unwrap().id();

        assert_eq!(held.find_by_id(id), Some(0));
        let removed = held.remove_by_id(id).unwrap();
        assert_eq!(removed.id(), id);
        assert!(held.is_empty());

        // Removing again is a no-op.
        assert!(held.remove_by_id(id).is_none());
        Ok(())
    }
}
