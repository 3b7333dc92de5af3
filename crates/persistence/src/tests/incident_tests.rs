// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the incident log.

use super::helpers::{admit_ok, new_persistence, seed_operator, seed_tenant, visit_record};
use crate::{NewAttachmentRecord, NewIncidentRecord};

fn incident_record(visit_id: i64, reported_by: i64, occurred_at: &str) -> NewIncidentRecord {
    NewIncidentRecord {
        visit_id,
        reported_by,
        occurred_at: occurred_at.to_string(),
        what: String::from("Pallet dropped during unloading"),
        why: String::from("Forklift operated too fast"),
        location: String::from("Dock 3"),
        who: String::from("Forklift operator"),
        how: String::from("Load shifted on the ramp"),
        how_much: Some(String::from("350.00")),
    }
}

#[test]
fn test_incident_with_attachments_round_trips() {
    let mut persistence = new_persistence();
    let operator_id = seed_operator(&mut persistence);
    let tenant_id = seed_tenant(&mut persistence);
    let record = visit_record("2024-06-01T09:15:00Z", tenant_id, operator_id);
    let visit_id = admit_ok(
        &mut persistence,
        &record,
        "2024-06-01T09:00:00Z",
        "2024-06-01T10:00:00Z",
    );

    let attachments = vec![
        NewAttachmentRecord {
            file_name: String::from("pallet.jpg"),
            url: String::from("/uploads/pallet-1717232000.jpg"),
            mime_type: String::from("image/jpeg"),
        },
        NewAttachmentRecord {
            file_name: String::from("report.pdf"),
            url: String::from("/uploads/report-1717232001.pdf"),
            mime_type: String::from("application/pdf"),
        },
    ];
    let incident_id = persistence
        .insert_incident(
            &incident_record(visit_id, operator_id, "2024-06-01T09:40:00Z"),
            &attachments,
        )
        .expect("Insert failed");

    let incident = persistence
        .get_incident(incident_id)
        .expect("Query failed")
        .expect("Incident should exist");
    assert_eq!(incident.visit_id, visit_id);
    assert_eq!(incident.what, "Pallet dropped during unloading");
    assert_eq!(incident.how_much.as_deref(), Some("350.00"));
    assert_eq!(incident.tenant_name, "Acme");
    assert_eq!(incident.reporter_name, "Gate Operator");
    assert_eq!(incident.attachments.len(), 2);
    assert_eq!(incident.attachments[0].file_name, "pallet.jpg");
}

#[test]
fn test_incident_creation_does_not_mutate_the_visit() {
    let mut persistence = new_persistence();
    let operator_id = seed_operator(&mut persistence);
    let tenant_id = seed_tenant(&mut persistence);
    let record = visit_record("2024-06-01T09:15:00Z", tenant_id, operator_id);
    let visit_id = admit_ok(
        &mut persistence,
        &record,
        "2024-06-01T09:00:00Z",
        "2024-06-01T10:00:00Z",
    );

    let before = persistence
        .get_visit(visit_id)
        .expect("Query failed")
        .expect("Visit should exist");
    persistence
        .insert_incident(
            &incident_record(visit_id, operator_id, "2024-06-01T09:40:00Z"),
            &[],
        )
        .expect("Insert failed");
    let after = persistence
        .get_visit(visit_id)
        .expect("Query failed")
        .expect("Visit should exist");
    assert_eq!(before, after);
}

#[test]
fn test_incident_requires_an_existing_visit() {
    let mut persistence = new_persistence();
    let operator_id = seed_operator(&mut persistence);

    let result =
        persistence.insert_incident(&incident_record(404, operator_id, "2024-06-01T09:40:00Z"), &[]);
    assert!(result.is_err(), "Foreign key violation should surface");
}

#[test]
fn test_listing_is_newest_first() {
    let mut persistence = new_persistence();
    let operator_id = seed_operator(&mut persistence);
    let tenant_id = seed_tenant(&mut persistence);
    let record = visit_record("2024-06-01T09:15:00Z", tenant_id, operator_id);
    let visit_id = admit_ok(
        &mut persistence,
        &record,
        "2024-06-01T09:00:00Z",
        "2024-06-01T10:00:00Z",
    );

    for occurred_at in ["2024-06-01T09:40:00Z", "2024-06-01T11:00:00Z"] {
        persistence
            .insert_incident(&incident_record(visit_id, operator_id, occurred_at), &[])
            .expect("Insert failed");
    }

    let incidents = persistence.list_incidents().expect("List failed");
    assert_eq!(incidents.len(), 2);
    assert_eq!(incidents[0].occurred_at, "2024-06-01T11:00:00Z");
    assert_eq!(incidents[1].occurred_at, "2024-06-01T09:40:00Z");
}
