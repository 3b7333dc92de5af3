// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test fixtures for core planning tests.

use crate::AdmissionRequest;
use time::OffsetDateTime;
use time::macros::datetime;

pub fn test_scheduled_at() -> OffsetDateTime {
    datetime!(2024-06-01 10:15:00 UTC)
}

/// A valid direct booking request.
pub fn direct_request() -> AdmissionRequest {
    AdmissionRequest {
        scheduled_at: test_scheduled_at(),
        tenant_id: 5,
        carrier_id: Some(3),
        description: Some(String::from("Weekly restock")),
        accepted_terms: true,
        requires_confirmation: false,
        plate: Some(String::from("XYZ987")),
        driver_name: Some(String::from("Jane Doe")),
        driver_national_id: Some(String::from("12345678")),
        companions: vec![],
    }
}

/// A valid confirmation-pending booking request with no vehicle details.
pub fn deferred_request() -> AdmissionRequest {
    AdmissionRequest {
        scheduled_at: test_scheduled_at(),
        tenant_id: 5,
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
