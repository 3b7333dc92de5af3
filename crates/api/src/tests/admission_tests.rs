// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for visit admission through the API boundary.

use super::helpers::{
    deferred_visit_request, direct_visit_request, new_persistence, operator_actor, tenant_actor,
};
use crate::{ApiError, create_visit};

#[test]
fn test_direct_booking_end_to_end() {
    let mut persistence = new_persistence();
    let actor = operator_actor(&mut persistence);
    let (tenant_id, _) = tenant_actor(&mut persistence);

    let visit = create_visit(&mut persistence, &direct_visit_request(tenant_id), &actor)
        .expect("Direct booking should succeed");

    assert_eq!(visit.status, "PENDIENTE");
    assert_eq!(visit.tenant.tenant_id, tenant_id);
    assert_eq!(visit.plate.as_deref(), Some("XYZ987"));
    assert_eq!(visit.driver_name.as_deref(), Some("Jane Doe"));
    assert_eq!(visit.driver_national_id.as_deref(), Some("12345678"));
    assert!(!visit.requires_confirmation);
    assert!(visit.arrived_at.is_none());
    assert!(visit.unloading_started_at.is_none());
    assert!(visit.finished_at.is_none());
    assert!(visit.departed_at.is_none());
    assert_eq!(visit.created_by, actor.operator_id);
}

#[test]
fn test_short_plate_is_rejected() {
    let mut persistence = new_persistence();
    let actor = operator_actor(&mut persistence);
    let (tenant_id, _) = tenant_actor(&mut persistence);

    let mut request = direct_visit_request(tenant_id);
    request.plate = Some(String::from("AB12"));

    let result = create_visit(&mut persistence, &request, &actor);
    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "plate"),
        other => panic!("Expected InvalidInput for plate, got {other:?}"),
    }
}

#[test]
fn test_six_alphanumeric_plate_is_accepted() {
    let mut persistence = new_persistence();
    let actor = operator_actor(&mut persistence);
    let (tenant_id, _) = tenant_actor(&mut persistence);

    let mut request = direct_visit_request(tenant_id);
    request.plate = Some(String::from("AB1234"));

    let visit = create_visit(&mut persistence, &request, &actor).expect("Booking should succeed");
    assert_eq!(visit.plate.as_deref(), Some("AB1234"));
}

#[test]
fn test_deferred_booking_needs_no_vehicle_details() {
    let mut persistence = new_persistence();
    let actor = operator_actor(&mut persistence);
    let (tenant_id, _) = tenant_actor(&mut persistence);

    let visit = create_visit(&mut persistence, &deferred_visit_request(tenant_id), &actor)
        .expect("Deferred booking should succeed");

    assert!(visit.requires_confirmation);
    assert!(visit.plate.is_none());
    assert!(visit.driver_name.is_none());
    assert_eq!(visit.status, "PENDIENTE");
}

#[test]
fn test_terms_must_be_accepted() {
    let mut persistence = new_persistence();
    let actor = operator_actor(&mut persistence);
    let (tenant_id, _) = tenant_actor(&mut persistence);

    let mut request = direct_visit_request(tenant_id);
    request.accepted_terms = false;

    let result = create_visit(&mut persistence, &request, &actor);
    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "accepted_terms"),
        other => panic!("Expected InvalidInput for accepted_terms, got {other:?}"),
    }
}

#[test]
fn test_unknown_tenant_is_rejected_before_any_write() {
    let mut persistence = new_persistence();
    let actor = operator_actor(&mut persistence);

    let result = create_visit(&mut persistence, &direct_visit_request(4242), &actor);
    match result {
        Err(ApiError::ResourceNotFound { resource_type, .. }) => {
            assert_eq!(resource_type, "Tenant");
        }
        other => panic!("Expected ResourceNotFound for tenant, got {other:?}"),
    }

    let count = persistence
        .count_visits_in_window("2024-06-01T10:00:00.000000000Z", "2024-06-01T11:00:00.000000000Z")
        .expect("Count failed");
    assert_eq!(count, 0);
}

#[test]
fn test_unknown_carrier_is_rejected() {
    let mut persistence = new_persistence();
    let actor = operator_actor(&mut persistence);
    let (tenant_id, _) = tenant_actor(&mut persistence);

    let mut request = direct_visit_request(tenant_id);
    request.carrier_id = Some(77);

    let result = create_visit(&mut persistence, &request, &actor);
    match result {
        Err(ApiError::ResourceNotFound { resource_type, .. }) => {
            assert_eq!(resource_type, "Carrier");
        }
        other => panic!("Expected ResourceNotFound for carrier, got {other:?}"),
    }
}

#[test]
fn test_ninth_booking_in_a_full_hour_is_rejected() {
    let mut persistence = new_persistence();
    let actor = operator_actor(&mut persistence);
    let (tenant_id, _) = tenant_actor(&mut persistence);

    for minute in 0..8 {
        let mut request = direct_visit_request(tenant_id);
        request.scheduled_at = format!("2024-06-01T09:0{minute}:00Z");
        create_visit(&mut persistence, &request, &actor).expect("Booking should succeed");
    }

    let mut ninth = direct_visit_request(tenant_id);
    ninth.scheduled_at = String::from("2024-06-01T09:30:00Z");
    let result = create_visit(&mut persistence, &ninth, &actor);
    match result {
        Err(ApiError::SlotFull { existing, .. }) => assert_eq!(existing, 8),
        other => panic!("Expected SlotFull, got {other:?}"),
    }

    // The next clock hour is a fresh window
    let mut tenth = direct_visit_request(tenant_id);
    tenth.scheduled_at = String::from("2024-06-01T10:00:00Z");
    create_visit(&mut persistence, &tenth, &actor).expect("Next hour should have capacity");
}

#[test]
fn test_window_boundary_at_the_top_of_the_hour() {
    let mut persistence = new_persistence();
    let actor = operator_actor(&mut persistence);
    let (tenant_id, _) = tenant_actor(&mut persistence);

    for minute in 0..8 {
        let mut request = direct_visit_request(tenant_id);
        request.scheduled_at = format!("2024-06-01T14:1{minute}:00Z");
        create_visit(&mut persistence, &request, &actor).expect("Booking should succeed");
    }

    // 14:59:59 still falls into the full 14:00 window
    let mut last_second = direct_visit_request(tenant_id);
    last_second.scheduled_at = String::from("2024-06-01T14:59:59Z");
    assert!(matches!(
        create_visit(&mut persistence, &last_second, &actor),
        Err(ApiError::SlotFull { .. })
    ));

    // 15:00:00 opens a new window
    let mut next_hour = direct_visit_request(tenant_id);
    next_hour.scheduled_at = String::from("2024-06-01T15:00:00Z");
    create_visit(&mut persistence, &next_hour, &actor).expect("New window should admit");
}

#[test]
fn test_malformed_timestamp_is_rejected() {
    let mut persistence = new_persistence();
    let actor = operator_actor(&mut persistence);
    let (tenant_id, _) = tenant_actor(&mut persistence);

    let mut request = direct_visit_request(tenant_id);
    request.scheduled_at = String::from("01/06/2024 10:15");

    let result = create_visit(&mut persistence, &request, &actor);
    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}
