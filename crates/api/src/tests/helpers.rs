// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use dock_visit_persistence::Persistence;

use crate::{AuthenticatedActor, CreateVisitRequest, Role};

pub fn new_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// Creates an operator row and returns the matching actor.
pub fn create_actor(persistence: &mut Persistence, login_name: &str, role: Role) -> AuthenticatedActor {
    let operator_id = persistence
        .create_operator(login_name, "Test Account", "irrelevant-pass", role.as_str())
        .expect("Failed to create operator");
    AuthenticatedActor::new(operator_id, login_name.to_uppercase(), role)
}

pub fn admin_actor(persistence: &mut Persistence) -> AuthenticatedActor {
    create_actor(persistence, "admin-1", Role::Admin)
}

pub fn operator_actor(persistence: &mut Persistence) -> AuthenticatedActor {
    create_actor(persistence, "operator-1", Role::Operator)
}

/// Creates a tenant with its provisioned login and returns the tenant id
/// together with an actor for that login.
pub fn tenant_actor(persistence: &mut Persistence) -> (i64, AuthenticatedActor) {
    let (tenant_id, operator_id) = persistence
        .create_tenant_with_login("Acme", "Acme S.A.C.", "20100200301", "ruc20100200301", "temp1234")
        .expect("Failed to create tenant");
    (
        tenant_id,
        AuthenticatedActor::new(operator_id, String::from("RUC20100200301"), Role::Tenant),
    )
}

pub fn seed_carrier(persistence: &mut Persistence, tenant_id: i64) -> i64 {
    persistence
        .upsert_carrier("Transportes Andinos", "20987654321", &[tenant_id])
        .expect("Failed to create carrier")
}

/// A valid direct-booking request at 2024-06-01 10:15 UTC.
pub fn direct_visit_request(tenant_id: i64) -> CreateVisitRequest {
    CreateVisitRequest {
        scheduled_at: String::from("2024-06-01T10:15:00Z"),
        tenant_id,
        carrier_id: None,
        description: Some(String::from("Weekly restock")),
        accepted_terms: true,
        requires_confirmation: false,
        plate: Some(String::from("XYZ987")),
        driver_name: Some(String::from("Jane Doe")),
        driver_national_id: Some(String::from("12345678")),
        companions: vec![],
    }
}

/// A valid confirmation-pending request with no vehicle details.
pub fn deferred_visit_request(tenant_id: i64) -> CreateVisitRequest {
    CreateVisitRequest {
        scheduled_at: String::from("2024-06-01T10:15:00Z"),
        tenant_id,
        carrier_id: None,
        description: None,
        accepted_terms: true,
        requires_confirmation: true,
        plate: None,
        driver_name: None,
        driver_national_id: None,
        companions: vec![],
    }
}
