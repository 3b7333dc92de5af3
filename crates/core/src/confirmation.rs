// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Confirmation planning for confirmation-pending visits.
//!
//! Confirmation supplies the vehicle/driver details a deferred booking left
//! out. It is idempotent: confirming an already-confirmed visit simply
//! overwrites the same fields. Authorization is enforced at the API
//! boundary, not here.

use crate::error::CoreError;
use dock_visit_domain::{Plate, VehicleDetails};

/// The operational details supplied at confirmation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationDetails {
    /// The carrier to assign, if it changes.
    pub carrier_id: Option<i64>,
    /// Replacement description, if any.
    pub description: Option<String>,
    /// The vehicle plate.
    pub plate: String,
    /// The driver's name.
    pub driver_name: String,
    /// The driver's national id.
    pub driver_national_id: String,
    /// Accompanying persons.
    pub companions: Vec<String>,
}

/// Validates confirmation details into vehicle details.
///
/// # Errors
///
/// Returns a `DomainViolation` if the plate fails validation or a driver
/// field is empty.
pub fn plan_confirmation(details: &ConfirmationDetails) -> Result<VehicleDetails, CoreError> {
    let plate = Plate::new(&details.plate)?;
    Ok(VehicleDetails::new(
        plate,
        &details.driver_name,
        &details.driver_national_id,
        details.companions.clone(),
    )?)
}
