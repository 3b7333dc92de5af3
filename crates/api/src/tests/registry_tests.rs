// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the carrier/tenant registries and the incident log through
//! the API boundary.

use super::helpers::{
    direct_visit_request, new_persistence, operator_actor, seed_carrier, tenant_actor,
};
use crate::{
    ApiError, AttachmentInfo, AuthenticationService, CreateCarrierRequest, CreateIncidentRequest,
    CreateTenantRequest, RegisterCarrierForTenantRequest, UpdateCarrierRequest, create_carrier,
    create_incident, create_tenant, create_visit, get_my_tenant, list_carriers, list_incidents,
    list_my_carriers, list_my_visits, list_tenants, register_carrier_for_tenant, update_carrier,
};

fn incident_request(visit_id: i64) -> CreateIncidentRequest {
    CreateIncidentRequest {
        visit_id,
        what: String::from("Pallet dropped during unloading"),
        why: String::from("Forklift operated too fast"),
        location: String::from("Dock 3"),
        who: String::from("Forklift operator"),
        how: String::from("Load shifted on the ramp"),
        how_much: Some(String::from("350.00")),
        attachments: vec![],
    }
}

#[test]
fn test_tenant_creation_provisions_a_working_login() {
    let mut persistence = new_persistence();
    let actor = operator_actor(&mut persistence);

    let response = create_tenant(
        &mut persistence,
        &CreateTenantRequest {
            trade_name: String::from("Acme"),
            legal_name: String::from("Acme S.A.C."),
            tax_id: String::from("20100200301"),
        },
        &actor,
    )
    .expect("Tenant creation should succeed");

    assert_eq!(response.login_name, "RUC20100200301");
    assert_eq!(response.temp_password.len(), 8);

    // The returned credentials actually log in
    let (_token, tenant_actor, _) = AuthenticationService::login(
        &mut persistence,
        &response.login_name,
        &response.temp_password,
    )
    .expect("Provisioned login should work");

    let me = get_my_tenant(&mut persistence, &tenant_actor).expect("Tenant lookup should work");
    assert_eq!(me.tenant_id, response.tenant.tenant_id);
}

#[test]
fn test_duplicate_tenant_tax_id_is_a_rule_violation() {
    let mut persistence = new_persistence();
    let actor = operator_actor(&mut persistence);
    let request = CreateTenantRequest {
        trade_name: String::from("Acme"),
        legal_name: String::from("Acme S.A.C."),
        tax_id: String::from("20100200301"),
    };
    create_tenant(&mut persistence, &request, &actor).expect("First creation should succeed");

    let result = create_tenant(&mut persistence, &request, &actor);
    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { .. })
    ));
}

#[test]
fn test_tenant_listing_includes_login_state() {
    let mut persistence = new_persistence();
    let actor = operator_actor(&mut persistence);
    let (tenant_id, _) = tenant_actor(&mut persistence);

    let tenants = list_tenants(&mut persistence, &actor).expect("Listing should succeed");
    assert_eq!(tenants.len(), 1);
    assert_eq!(tenants[0].tenant.tenant_id, tenant_id);
    assert_eq!(tenants[0].login_name.as_deref(), Some("RUC20100200301"));
    assert_eq!(tenants[0].login_disabled, Some(false));
}

#[test]
fn test_carrier_registration_and_listing() {
    let mut persistence = new_persistence();
    let actor = operator_actor(&mut persistence);
    let (tenant_id, _) = tenant_actor(&mut persistence);

    let carrier = create_carrier(
        &mut persistence,
        &CreateCarrierRequest {
            name: String::from("Transportes Andinos"),
            tax_id: String::from("20987654321"),
            tenant_ids: vec![tenant_id],
        },
        &actor,
    )
    .expect("Carrier creation should succeed");

    let carriers = list_carriers(&mut persistence).expect("Listing should succeed");
    assert_eq!(carriers.len(), 1);
    assert_eq!(carriers[0].carrier.carrier_id, carrier.carrier_id);
    assert_eq!(carriers[0].tenant_ids, vec![tenant_id]);
}

#[test]
fn test_carrier_upsert_by_tax_id_updates_the_name() {
    let mut persistence = new_persistence();
    let actor = operator_actor(&mut persistence);

    let first = create_carrier(
        &mut persistence,
        &CreateCarrierRequest {
            name: String::from("Transportes Andinos"),
            tax_id: String::from("20987654321"),
            tenant_ids: vec![],
        },
        &actor,
    )
    .expect("Carrier creation should succeed");
    let second = create_carrier(
        &mut persistence,
        &CreateCarrierRequest {
            name: String::from("Transportes Andinos S.A."),
            tax_id: String::from("20987654321"),
            tenant_ids: vec![],
        },
        &actor,
    )
    .expect("Re-registration should succeed");

    assert_eq!(first.carrier_id, second.carrier_id);
    assert_eq!(second.name, "Transportes Andinos S.A.");
}

#[test]
fn test_tenant_registers_its_own_carrier() {
    let mut persistence = new_persistence();
    let (tenant_id, tenant) = tenant_actor(&mut persistence);

    let carrier = register_carrier_for_tenant(
        &mut persistence,
        &RegisterCarrierForTenantRequest {
            name: String::from("Cargas del Sur"),
            tax_id: String::from("20444555666"),
        },
        &tenant,
    )
    .expect("Tenant carrier registration should succeed");

    let mine = list_my_carriers(&mut persistence, &tenant).expect("Listing should succeed");
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].carrier_id, carrier.carrier_id);

    let all = list_carriers(&mut persistence).expect("Listing should succeed");
    assert_eq!(all[0].tenant_ids, vec![tenant_id]);
}

#[test]
fn test_update_carrier_rejects_a_taken_tax_id() {
    let mut persistence = new_persistence();
    let actor = operator_actor(&mut persistence);
    let (tenant_id, _) = tenant_actor(&mut persistence);
    let first = seed_carrier(&mut persistence, tenant_id);
    let second = persistence
        .upsert_carrier("Cargas del Sur", "20444555666", &[])
        .expect("Failed to create carrier");

    let result = update_carrier(
        &mut persistence,
        second,
        &UpdateCarrierRequest {
            name: String::from("Cargas del Sur"),
            tax_id: String::from("20987654321"),
            tenant_ids: vec![],
        },
        &actor,
    );
    match result {
        Err(ApiError::DomainRuleViolation { rule, .. }) => {
            assert_eq!(rule, "unique_carrier_tax_id");
        }
        other => panic!("Expected DomainRuleViolation, got {other:?}"),
    }

    // The first carrier still owns its tax id
    let stored = persistence
        .get_carrier(first)
        .expect("Query failed")
        .expect("Carrier should exist");
    assert_eq!(stored.tax_id, "20987654321");
}

#[test]
fn test_my_visits_shows_only_the_tenants_bookings() {
    let mut persistence = new_persistence();
    let operator = operator_actor(&mut persistence);
    let (tenant_id, tenant) = tenant_actor(&mut persistence);
    let (other_tenant_id, _) = persistence
        .create_tenant_with_login("Borealis", "Borealis S.A.", "20555666777", "ruc20555666777", "temp1234")
        .expect("Failed to create tenant");

    // The tenant listing window is relative to now
    let now = time::OffsetDateTime::now_utc();
    let in_window =
        dock_visit_domain::format_timestamp(now + time::Duration::days(1)).expect("format");

    let mut mine = direct_visit_request(tenant_id);
    mine.scheduled_at = in_window.clone();
    create_visit(&mut persistence, &mine, &operator).expect("Booking should succeed");

    let mut other = direct_visit_request(other_tenant_id);
    other.scheduled_at = in_window;
    create_visit(&mut persistence, &other, &operator).expect("Booking should succeed");

    let visits = list_my_visits(&mut persistence, &tenant).expect("Listing should succeed");
    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0].tenant.tenant_id, tenant_id);
}

#[test]
fn test_incident_round_trip() {
    let mut persistence = new_persistence();
    let actor = operator_actor(&mut persistence);
    let (tenant_id, _) = tenant_actor(&mut persistence);
    let visit = create_visit(&mut persistence, &direct_visit_request(tenant_id), &actor)
        .expect("Booking should succeed");

    let mut request = incident_request(visit.visit_id);
    request.attachments = vec![AttachmentInfo {
        file_name: String::from("pallet.jpg"),
        url: String::from("/uploads/pallet-1717232000.jpg"),
        mime_type: String::from("image/jpeg"),
    }];

    let incident =
        create_incident(&mut persistence, &request, &actor).expect("Incident should be recorded");
    assert_eq!(incident.visit_id, visit.visit_id);
    assert_eq!(incident.tenant_name, "Acme");
    assert_eq!(incident.attachments.len(), 1);

    let incidents = list_incidents(&mut persistence).expect("Listing should succeed");
    assert_eq!(incidents.len(), 1);

    // The referenced visit is untouched
    let stored = persistence
        .get_visit(visit.visit_id)
        .expect("Query failed")
        .expect("Visit should exist");
    assert_eq!(stored.status, "PENDIENTE");
}

#[test]
fn test_incident_requires_the_mandatory_5w2h_fields() {
    let mut persistence = new_persistence();
    let actor = operator_actor(&mut persistence);
    let (tenant_id, _) = tenant_actor(&mut persistence);
    let visit = create_visit(&mut persistence, &direct_visit_request(tenant_id), &actor)
        .expect("Booking should succeed");

    let mut request = incident_request(visit.visit_id);
    request.why = String::new();

    let result = create_incident(&mut persistence, &request, &actor);
    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "why"),
        other => panic!("Expected InvalidInput for why, got {other:?}"),
    }
}

#[test]
fn test_incident_attachment_limit() {
    let mut persistence = new_persistence();
    let actor = operator_actor(&mut persistence);
    let (tenant_id, _) = tenant_actor(&mut persistence);
    let visit = create_visit(&mut persistence, &direct_visit_request(tenant_id), &actor)
        .expect("Booking should succeed");

    let mut request = incident_request(visit.visit_id);
    request.attachments = (0..6)
        .map(|i| AttachmentInfo {
            file_name: format!("photo-{i}.jpg"),
            url: format!("/uploads/photo-{i}.jpg"),
            mime_type: String::from("image/jpeg"),
        })
        .collect();

    let result = create_incident(&mut persistence, &request, &actor);
    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_incident_against_unknown_visit_is_not_found() {
    let mut persistence = new_persistence();
    let actor = operator_actor(&mut persistence);

    let result = create_incident(&mut persistence, &incident_request(404), &actor);
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}
