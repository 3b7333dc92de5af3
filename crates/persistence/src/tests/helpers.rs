// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test fixtures for persistence tests.
//!
//! All tests run against unique in-memory `SQLite` databases; timestamps
//! are plain UTC ISO 8601 literals so range comparisons are easy to read.

use crate::{NewVisitRecord, Persistence};

pub fn new_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn seed_operator(persistence: &mut Persistence) -> i64 {
    persistence
        .create_operator("gate-op", "Gate Operator", "hunter2hunter2", "Operator")
        .expect("Failed to create operator")
}

pub fn seed_tenant(persistence: &mut Persistence) -> i64 {
    let (tenant_id, _operator_id) = persistence
        .create_tenant_with_login("Acme", "Acme S.A.C.", "20100200301", "ruc20100200301", "temp1234")
        .expect("Failed to create tenant");
    tenant_id
}

pub fn seed_carrier(persistence: &mut Persistence, tenant_id: i64) -> i64 {
    persistence
        .upsert_carrier("Transportes Andinos", "20987654321", &[tenant_id])
        .expect("Failed to create carrier")
}

/// A direct-booking visit record scheduled at the given time.
pub fn visit_record(scheduled_at: &str, tenant_id: i64, created_by: i64) -> NewVisitRecord {
    NewVisitRecord {
        scheduled_at: scheduled_at.to_string(),
        tenant_id,
        carrier_id: None,
        plate: Some(String::from("XYZ987")),
        driver_name: Some(String::from("Jane Doe")),
        driver_national_id: Some(String::from("12345678")),
        companions: vec![],
        accepted_terms: true,
        requires_confirmation: false,
        status: String::from("PENDIENTE"),
        description: None,
        created_by,
        created_at: String::from("2024-06-01T08:00:00Z"),
    }
}

/// Admits a visit expecting success; returns the visit id.
pub fn admit_ok(
    persistence: &mut Persistence,
    record: &NewVisitRecord,
    window_start: &str,
    window_end: &str,
) -> i64 {
    match persistence
        .admit_visit(record, window_start, window_end, 8)
        .expect("Admission failed")
    {
        crate::AdmissionOutcome::Created(visit_id) => visit_id,
        crate::AdmissionOutcome::SlotFull { existing } => {
            panic!("Expected admission, slot full with {existing}")
        }
    }
}
