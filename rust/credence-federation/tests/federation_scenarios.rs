//! End-to-end federation scenarios.
//!
//! These tests drive the whole engine through its public surface: creating
//! a federation, cataloguing properties, granting and revoking
//! accreditations, and validating claims with deterministic clocks.

use credence_federation::{EntityId, Federation, FederationError};
use credence_property::{FederationProperty, PropertyName, PropertyShape, PropertyValue};
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;
use testresult::TestResult;

fn text_values(values: &[&str]) -> BTreeSet<PropertyValue> {
    values.iter().map(|value| PropertyValue::from(*value)).collect()
}

// =============================================================================
// Happy path
// =============================================================================

#[test_log::test]
fn attestation_lifecycle_end_to_end() -> TestResult {
    let t0 = 1_000;
    let t1 = 2_000;

    // Create a federation; the creator R is the sole root authority.
    let (mut federation, genesis) = Federation::new(EntityId::from("R"));

    // R admits a degree property with two allowed values.
    federation.add_property(
        &genesis.root_authority_cap,
        "deg.bachelor",
        text_values(&["completed", "in_progress"]),
        false,
    )?;

    // Root bypass: R grants studentX attest rights without holding any
    // accreditation itself.
    let student = EntityId::from("studentX");
    let (event, _) = federation.create_accreditation_to_attest(
        &genesis.accredit_cap,
        student.clone(),
        vec![FederationProperty::allow_any("deg.bachelor")],
        t0,
    )?;

    let name = PropertyName::from("deg.bachelor");
    let value = PropertyValue::from("completed");
    assert!(federation.validate_property(&student, &name, &value, t0));

    // Revoking the bundle takes effect immediately.
    federation.revoke_accreditation_to_attest(
        &genesis.accredit_cap,
        &student,
        event.accreditation_id,
        t1,
    )?;
    assert!(!federation.validate_property(&student, &name, &value, t1));
    Ok(())
}

#[test_log::test]
fn property_revocation_is_not_retroactive() -> TestResult {
    let (mut federation, genesis) = Federation::new(EntityId::from("R"));
    federation.add_property(
        &genesis.root_authority_cap,
        "deg.bachelor",
        text_values(&["completed"]),
        false,
    )?;

    let student = EntityId::from("studentX");
    federation.create_accreditation_to_attest(
        &genesis.accredit_cap,
        student.clone(),
        vec![FederationProperty::allow_any("deg.bachelor")],
        1_000,
    )?;

    // R closes the property's validity window at t=1500.
    federation.revoke_property(
        &genesis.root_authority_cap,
        &PropertyName::from("deg.bachelor"),
        1_500,
    )?;

    // The accreditation bundle remains structurally present.
    let held = federation
        .accreditations_of(
            credence_federation::AccreditationKind::ToAttest,
            &student,
        )
        .expect("student is registered");
    assert_eq!(held.len(), 1);

    // Claims validate before the revocation instant, not at or after it.
    let name = PropertyName::from("deg.bachelor");
    let value = PropertyValue::from("completed");
    assert!(federation.validate_property(&student, &name, &value, 1_499));
    assert!(!federation.validate_property(&student, &name, &value, 1_500));
    assert!(!federation.validate_property(&student, &name, &value, 2_000));
    Ok(())
}

#[test_log::test]
fn validate_properties_requires_every_claim() -> TestResult {
    let (mut federation, genesis) = Federation::new(EntityId::from("R"));
    federation.add_property(
        &genesis.root_authority_cap,
        "deg.bachelor",
        text_values(&["completed"]),
        false,
    )?;
    federation.add_property(
        &genesis.root_authority_cap,
        "deg.master",
        text_values(&["completed"]),
        false,
    )?;

    let student = EntityId::from("studentX");
    federation.create_accreditation_to_attest(
        &genesis.accredit_cap,
        student.clone(),
        vec![FederationProperty::allow_any("deg.bachelor")],
        0,
    )?;

    let granted_only = [(
        PropertyName::from("deg.bachelor"),
        PropertyValue::from("completed"),
    )]
    .into_iter()
    .collect();
    assert!(federation.validate_properties(&student, &granted_only, 0));

    let both = [
        (
            PropertyName::from("deg.bachelor"),
            PropertyValue::from("completed"),
        ),
        (
            PropertyName::from("deg.master"),
            PropertyValue::from("completed"),
        ),
    ]
    .into_iter()
    .collect();
    assert!(!federation.validate_properties(&student, &both, 0));
    Ok(())
}

#[test_log::test]
fn shaped_catalogue_properties_gate_claims_by_predicate() -> TestResult {
    let (mut federation, genesis) = Federation::new(EntityId::from("R"));
    federation.add_shaped_property(
        &genesis.root_authority_cap,
        "score.engineering",
        PropertyShape::GreaterThan(50),
    )?;

    // The grader's bundle carries the same predicate as the catalogue entry.
    let grader = EntityId::from("grader");
    federation.create_accreditation_to_attest(
        &genesis.accredit_cap,
        grader.clone(),
        vec![
            FederationProperty::builder("score.engineering")
                .shape(PropertyShape::GreaterThan(50))
                .try_build()?,
        ],
        0,
    )?;

    let name = PropertyName::from("score.engineering");
    assert!(federation.validate_property(&grader, &name, &PropertyValue::from(51), 0));
    assert!(!federation.validate_property(&grader, &name, &PropertyValue::from(50), 0));
    assert!(!federation.validate_property(&grader, &name, &PropertyValue::from("fifty-one"), 0));
    Ok(())
}

#[test_log::test]
fn shaped_property_admission_requires_the_right_capability() {
    let (mut ours, _) = Federation::new(EntityId::from("R"));
    let (_, foreign) = Federation::new(EntityId::from("R"));

    let result = ours.add_shaped_property(
        &foreign.root_authority_cap,
        "score.engineering",
        PropertyShape::GreaterThan(50),
    );
    assert!(matches!(
        result.unwrap_err(),
        FederationError::WrongFederation { .. }
    ));
}

// =============================================================================
// Capability and authority failures
// =============================================================================

#[test_log::test]
fn foreign_federation_capabilities_are_rejected() -> TestResult {
    let (mut ours, _) = Federation::new(EntityId::from("R"));
    let (_, foreign) = Federation::new(EntityId::from("R"));

    let result = ours.create_accreditation_to_attest(
        &foreign.accredit_cap,
        EntityId::from("studentX"),
        vec![FederationProperty::allow_any("deg.bachelor")],
        0,
    );
    assert!(matches!(
        result.unwrap_err(),
        FederationError::WrongFederation { .. }
    ));
    Ok(())
}

#[test_log::test]
fn revoked_root_authority_loses_grant_rights_immediately() -> TestResult {
    let (mut federation, genesis) = Federation::new(EntityId::from("R"));
    federation.add_property(
        &genesis.root_authority_cap,
        "deg.bachelor",
        text_values(&["completed"]),
        false,
    )?;

    let second = federation
        .add_root_authority(&genesis.root_authority_cap, EntityId::from("second"))?;
    federation.revoke_root_authority(&genesis.root_authority_cap, &EntityId::from("second"))?;

    // The revoked authority kept its accredit token, but the root bypass no
    // longer applies and it holds no accreditations of its own.
    let result = federation.create_accreditation_to_attest(
        &second.accredit_cap,
        EntityId::from("studentX"),
        vec![FederationProperty::allow_any("deg.bachelor")],
        0,
    );
    assert_eq!(result.unwrap_err(), FederationError::InsufficientAccreditation);
    Ok(())
}

#[test_log::test]
fn event_payloads_serialize_for_the_audit_trail() -> TestResult {
    let (mut federation, genesis) = Federation::new(EntityId::from("R"));
    federation.add_property(
        &genesis.root_authority_cap,
        "deg.bachelor",
        text_values(&["completed"]),
        false,
    )?;

    let (event, _) = federation.create_accreditation_to_attest(
        &genesis.accredit_cap,
        EntityId::from("studentX"),
        vec![FederationProperty::allow_any("deg.bachelor")],
        0,
    )?;

    let json = serde_json::to_value(&event)?;
    assert_eq!(json["kind"], "to_attest");
    assert_eq!(json["receiver"], "studentX");
    assert_eq!(json["accredited_by"], "R");
    Ok(())
}
