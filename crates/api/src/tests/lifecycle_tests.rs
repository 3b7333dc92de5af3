// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the visit status lifecycle through the API boundary.

use super::helpers::{direct_visit_request, new_persistence, operator_actor, tenant_actor};
use crate::{ApiError, advance_visit_status, create_visit, visit_history};

#[test]
fn test_arrival_stamps_arrived_at_only() {
    let mut persistence = new_persistence();
    let actor = operator_actor(&mut persistence);
    let (tenant_id, _) = tenant_actor(&mut persistence);
    let visit = create_visit(&mut persistence, &direct_visit_request(tenant_id), &actor)
        .expect("Booking should succeed");

    let updated = advance_visit_status(&mut persistence, visit.visit_id, "LLEGO", &actor)
        .expect("Transition should succeed");

    assert_eq!(updated.status, "LLEGO");
    assert!(updated.arrived_at.is_some());
    assert!(updated.unloading_started_at.is_none());
    assert!(updated.finished_at.is_none());
    assert!(updated.departed_at.is_none());
}

#[test]
fn test_later_transition_keeps_earlier_stamp() {
    let mut persistence = new_persistence();
    let actor = operator_actor(&mut persistence);
    let (tenant_id, _) = tenant_actor(&mut persistence);
    let visit = create_visit(&mut persistence, &direct_visit_request(tenant_id), &actor)
        .expect("Booking should succeed");

    let arrived = advance_visit_status(&mut persistence, visit.visit_id, "LLEGO", &actor)
        .expect("Transition should succeed");
    let finished = advance_visit_status(&mut persistence, visit.visit_id, "FINALIZADO", &actor)
        .expect("Transition should succeed");

    assert_eq!(finished.status, "FINALIZADO");
    assert!(finished.finished_at.is_some());
    assert_eq!(finished.arrived_at, arrived.arrived_at);
    assert!(finished.unloading_started_at.is_none());
}

#[test]
fn test_reapplying_a_status_keeps_the_first_stamp() {
    let mut persistence = new_persistence();
    let actor = operator_actor(&mut persistence);
    let (tenant_id, _) = tenant_actor(&mut persistence);
    let visit = create_visit(&mut persistence, &direct_visit_request(tenant_id), &actor)
        .expect("Booking should succeed");

    let first = advance_visit_status(&mut persistence, visit.visit_id, "LLEGO", &actor)
        .expect("Transition should succeed");
    let second = advance_visit_status(&mut persistence, visit.visit_id, "LLEGO", &actor)
        .expect("Transition should succeed");

    assert_eq!(second.arrived_at, first.arrived_at);
}

#[test]
fn test_full_progression_end_to_end() {
    let mut persistence = new_persistence();
    let actor = operator_actor(&mut persistence);
    let (tenant_id, _) = tenant_actor(&mut persistence);
    let visit = create_visit(&mut persistence, &direct_visit_request(tenant_id), &actor)
        .expect("Booking should succeed");
    assert_eq!(visit.status, "PENDIENTE");

    let arrived = advance_visit_status(&mut persistence, visit.visit_id, "LLEGO", &actor)
        .expect("Transition should succeed");
    assert_eq!(arrived.status, "LLEGO");
    assert!(arrived.arrived_at.is_some());

    let departed = advance_visit_status(&mut persistence, visit.visit_id, "RETIRADO", &actor)
        .expect("Transition should succeed");
    assert_eq!(departed.status, "RETIRADO");
    assert!(departed.departed_at.is_some());
    assert_eq!(departed.arrived_at, arrived.arrived_at);
}

#[test]
fn test_invalid_target_status_is_rejected() {
    let mut persistence = new_persistence();
    let actor = operator_actor(&mut persistence);
    let (tenant_id, _) = tenant_actor(&mut persistence);
    let visit = create_visit(&mut persistence, &direct_visit_request(tenant_id), &actor)
        .expect("Booking should succeed");

    let result = advance_visit_status(&mut persistence, visit.visit_id, "EN_CAMINO", &actor);
    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "status"),
        other => panic!("Expected InvalidInput for status, got {other:?}"),
    }

    // English literals are not wire values either
    assert!(matches!(
        advance_visit_status(&mut persistence, visit.visit_id, "ARRIVED", &actor),
        Err(ApiError::InvalidInput { .. })
    ));
}

#[test]
fn test_unknown_visit_is_not_found() {
    let mut persistence = new_persistence();
    let actor = operator_actor(&mut persistence);

    let result = advance_visit_status(&mut persistence, 404, "LLEGO", &actor);
    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_tenant_actor_cannot_advance_status() {
    let mut persistence = new_persistence();
    let operator = operator_actor(&mut persistence);
    let (tenant_id, tenant) = tenant_actor(&mut persistence);
    let visit = create_visit(&mut persistence, &direct_visit_request(tenant_id), &operator)
        .expect("Booking should succeed");

    let result = advance_visit_status(&mut persistence, visit.visit_id, "LLEGO", &tenant);
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_each_transition_appends_history() {
    let mut persistence = new_persistence();
    let actor = operator_actor(&mut persistence);
    let (tenant_id, _) = tenant_actor(&mut persistence);
    let visit = create_visit(&mut persistence, &direct_visit_request(tenant_id), &actor)
        .expect("Booking should succeed");

    advance_visit_status(&mut persistence, visit.visit_id, "LLEGO", &actor)
        .expect("Transition should succeed");
    advance_visit_status(&mut persistence, visit.visit_id, "DESCARGANDO", &actor)
        .expect("Transition should succeed");

    let history = visit_history(&mut persistence, visit.visit_id).expect("History should load");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].previous_status, "PENDIENTE");
    assert_eq!(history[0].new_status, "LLEGO");
    assert_eq!(history[1].previous_status, "LLEGO");
    assert_eq!(history[1].new_status, "DESCARGANDO");
    assert_eq!(history[0].transitioned_by, actor.operator_id);
}

#[test]
fn test_history_for_unknown_visit_is_not_found() {
    let mut persistence = new_persistence();
    let result = visit_history(&mut persistence, 404);
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}
