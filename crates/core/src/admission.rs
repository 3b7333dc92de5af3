// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Visit admission planning.
//!
//! Admission is split in two: this module performs the pure validation that
//! turns a raw booking request into a [`NewVisit`], and the persistence
//! layer performs the capacity-checked insert atomically. Nothing here
//! touches storage.

use crate::error::CoreError;
use dock_visit_domain::{
    DomainError, SlotWindow, VehicleAssignment, VehicleDetails, VisitStatus,
};
use time::OffsetDateTime;

/// A raw booking request, as received from a caller.
///
/// `plate`, `driver_name` and `driver_national_id` are required for direct
/// bookings and ignored for confirmation-pending ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionRequest {
    /// The requested visit time.
    pub scheduled_at: OffsetDateTime,
    /// The tenant the delivery is for.
    pub tenant_id: i64,
    /// The carrier fulfilling the delivery, if already known.
    pub carrier_id: Option<i64>,
    /// Free-text description of the delivery.
    pub description: Option<String>,
    /// Whether the booking terms were accepted.
    pub accepted_terms: bool,
    /// Whether vehicle/driver details are deferred to operator confirmation.
    pub requires_confirmation: bool,
    /// The vehicle plate (direct bookings only).
    pub plate: Option<String>,
    /// The driver's name (direct bookings only).
    pub driver_name: Option<String>,
    /// The driver's national id (direct bookings only).
    pub driver_national_id: Option<String>,
    /// Accompanying persons (direct bookings only).
    pub companions: Vec<String>,
}

/// A validated visit ready to be admitted into a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVisit {
    /// The requested visit time.
    pub scheduled_at: OffsetDateTime,
    /// The capacity window enclosing `scheduled_at`.
    pub window: SlotWindow,
    /// The tenant the delivery is for.
    pub tenant_id: i64,
    /// The carrier fulfilling the delivery, if already known.
    pub carrier_id: Option<i64>,
    /// Free-text description of the delivery.
    pub description: Option<String>,
    /// Whether the booking terms were accepted.
    pub accepted_terms: bool,
    /// Vehicle/driver details, deferred for confirmation-pending bookings.
    pub vehicle: VehicleAssignment,
    /// The initial lifecycle status. Always [`VisitStatus::Pending`].
    pub status: VisitStatus,
}

/// Validates a booking request and plans the visit to admit.
///
/// Direct bookings must carry a valid plate and driver details;
/// confirmation-pending bookings defer them. The capacity check itself
/// happens at admission time, inside the store transaction.
///
/// # Errors
///
/// Returns a `DomainViolation` if the terms were not accepted, a required
/// field is missing, or the plate fails validation.
pub fn plan_visit(request: &AdmissionRequest) -> Result<NewVisit, CoreError> {
    if !request.accepted_terms {
        return Err(DomainError::TermsNotAccepted.into());
    }

    let vehicle = if request.requires_confirmation {
        VehicleAssignment::Deferred
    } else {
        VehicleAssignment::Assigned(assigned_details(request)?)
    };

    Ok(NewVisit {
        scheduled_at: request.scheduled_at,
        window: SlotWindow::enclosing(request.scheduled_at),
        tenant_id: request.tenant_id,
        carrier_id: request.carrier_id,
        description: request.description.clone(),
        accepted_terms: request.accepted_terms,
        vehicle,
        status: VisitStatus::Pending,
    })
}

/// Builds the vehicle details for a direct booking.
fn assigned_details(request: &AdmissionRequest) -> Result<VehicleDetails, CoreError> {
    let plate = request
        .plate
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .ok_or(DomainError::MissingField("plate"))?;
    let driver_name = request
        .driver_name
        .as_deref()
        .ok_or(DomainError::MissingField("driver_name"))?;
    let driver_national_id = request
        .driver_national_id
        .as_deref()
        .ok_or(DomainError::MissingField("driver_national_id"))?;

    let plate = dock_visit_domain::Plate::new(plate)?;
    Ok(VehicleDetails::new(
        plate,
        driver_name,
        driver_national_id,
        request.companions.clone(),
    )?)
}
