// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, IncidentReport, MAX_INCIDENT_ATTACHMENTS, validate_attachment_count};

#[test]
fn test_complete_report_is_accepted() {
    let report = IncidentReport::new(
        "Pallet dropped during unloading",
        "Forklift operated too fast",
        "Dock 3",
        "Forklift operator",
        "Load shifted on the ramp",
        Some(String::from("350.00")),
    );
    assert!(report.is_ok());
}

#[test]
fn test_how_much_is_optional() {
    let report = IncidentReport::new(
        "Broken seal",
        "Worn gasket",
        "Dock 1",
        "Gate staff",
        "Seal cracked on opening",
        None,
    )
    .expect("report without cost should be accepted");
    assert!(report.how_much.is_none());
}

#[test]
fn test_each_mandatory_field_is_required() {
    let cases: [(&str, &str, &str, &str, &str, &'static str); 5] = [
        ("", "why", "where", "who", "how", "what"),
        ("what", "", "where", "who", "how", "why"),
        ("what", "why", " ", "who", "how", "where"),
        ("what", "why", "where", "", "how", "who"),
        ("what", "why", "where", "who", "", "how"),
    ];
    for (what, why, location, who, how, missing) in cases {
        let result = IncidentReport::new(what, why, location, who, how, None);
        assert_eq!(result, Err(DomainError::MissingField(missing)));
    }
}

#[test]
fn test_attachment_count_limit() {
    assert!(validate_attachment_count(0).is_ok());
    assert!(validate_attachment_count(MAX_INCIDENT_ATTACHMENTS).is_ok());
    assert_eq!(
        validate_attachment_count(MAX_INCIDENT_ATTACHMENTS + 1),
        Err(DomainError::TooManyAttachments {
            count: MAX_INCIDENT_ATTACHMENTS + 1,
            max: MAX_INCIDENT_ATTACHMENTS,
        })
    );
}
