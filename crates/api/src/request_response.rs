// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API boundary.
//!
//! All timestamps cross the boundary as UTC ISO 8601 strings and visit
//! statuses use their wire literals (`PENDIENTE`, `LLEGO`, `DESCARGANDO`,
//! `FINALIZADO`, `RETIRADO`).

use serde::{Deserialize, Serialize};

/// Request to book a visit.
///
/// `plate`, `driver_name` and `driver_national_id` are required when
/// `requires_confirmation` is false and ignored when it is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateVisitRequest {
    /// The requested visit time (ISO 8601).
    pub scheduled_at: String,
    /// The tenant the delivery is for.
    pub tenant_id: i64,
    /// The carrier fulfilling the delivery, if already known.
    #[serde(default)]
    pub carrier_id: Option<i64>,
    /// Free-text description of the delivery.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the booking terms were accepted.
    pub accepted_terms: bool,
    /// Whether vehicle/driver details are deferred to operator confirmation.
    #[serde(default)]
    pub requires_confirmation: bool,
    /// The vehicle plate (direct bookings only).
    #[serde(default)]
    pub plate: Option<String>,
    /// The driver's name (direct bookings only).
    #[serde(default)]
    pub driver_name: Option<String>,
    /// The driver's national id (direct bookings only).
    #[serde(default)]
    pub driver_national_id: Option<String>,
    /// Accompanying persons (direct bookings only).
    #[serde(default)]
    pub companions: Vec<String>,
}

/// A visit as returned by the API, joined with its parties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitInfo {
    pub visit_id: i64,
    pub scheduled_at: String,
    pub status: String,
    pub tenant: TenantInfo,
    pub carrier: Option<CarrierInfo>,
    pub plate: Option<String>,
    pub driver_name: Option<String>,
    pub driver_national_id: Option<String>,
    pub companions: Vec<String>,
    pub accepted_terms: bool,
    pub requires_confirmation: bool,
    pub description: Option<String>,
    pub arrived_at: Option<String>,
    pub unloading_started_at: Option<String>,
    pub finished_at: Option<String>,
    pub departed_at: Option<String>,
    pub created_by: i64,
    pub created_at: String,
}

/// Optional range filter for visit listings (inclusive bounds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ListVisitsRequest {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

/// One entry of a visit's status history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitHistoryEntry {
    pub previous_status: String,
    pub new_status: String,
    pub transitioned_at: String,
    pub transitioned_by: i64,
}

/// Operational details supplied when confirming a pending visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmVisitRequest {
    #[serde(default)]
    pub carrier_id: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    pub plate: String,
    pub driver_name: String,
    pub driver_national_id: String,
    #[serde(default)]
    pub companions: Vec<String>,
}

/// A carrier as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierInfo {
    pub carrier_id: i64,
    pub name: String,
    pub tax_id: String,
}

/// A carrier with the ids of its associated tenants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierWithTenantsInfo {
    pub carrier: CarrierInfo,
    pub tenant_ids: Vec<i64>,
}

/// Request to register a carrier (registry roles).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCarrierRequest {
    pub name: String,
    pub tax_id: String,
    #[serde(default)]
    pub tenant_ids: Vec<i64>,
}

/// Request for a tenant to register a carrier for itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterCarrierForTenantRequest {
    pub name: String,
    pub tax_id: String,
}

/// Request to update a carrier and replace its tenant associations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCarrierRequest {
    pub name: String,
    pub tax_id: String,
    #[serde(default)]
    pub tenant_ids: Vec<i64>,
}

/// A tenant as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantInfo {
    pub tenant_id: i64,
    pub trade_name: String,
    pub legal_name: String,
    pub tax_id: String,
}

/// A tenant with its login account state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantAccountInfo {
    pub tenant: TenantInfo,
    pub login_name: Option<String>,
    pub login_disabled: Option<bool>,
}

/// Request to create a tenant (provisions its login).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTenantRequest {
    pub trade_name: String,
    pub legal_name: String,
    pub tax_id: String,
}

/// Response to tenant creation, carrying the provisioned credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTenantResponse {
    pub tenant: TenantInfo,
    pub login_name: String,
    pub temp_password: String,
}

/// A stored attachment descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentInfo {
    pub file_name: String,
    pub url: String,
    pub mime_type: String,
}

/// Request to record an incident against a visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateIncidentRequest {
    pub visit_id: i64,
    pub what: String,
    pub why: String,
    #[serde(rename = "where")]
    pub location: String,
    pub who: String,
    pub how: String,
    #[serde(default)]
    pub how_much: Option<String>,
    #[serde(default)]
    pub attachments: Vec<AttachmentInfo>,
}

/// An incident as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentInfo {
    pub incident_id: i64,
    pub visit_id: i64,
    pub visit_scheduled_at: String,
    pub visit_status: String,
    pub tenant_name: String,
    pub carrier_name: Option<String>,
    pub reporter_name: String,
    pub occurred_at: String,
    pub what: String,
    pub why: String,
    #[serde(rename = "where")]
    pub location: String,
    pub who: String,
    pub how: String,
    pub how_much: Option<String>,
    pub attachments: Vec<AttachmentInfo>,
}

/// Request to create an operator account (Admin only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOperatorRequest {
    pub login_name: String,
    pub display_name: String,
    pub password: String,
    pub confirmation: String,
    pub role: String,
}

/// Response to operator creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOperatorResponse {
    pub operator_id: i64,
    pub login_name: String,
}

/// Request to change the authenticated operator's password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirmation: String,
}

/// Response to a password change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePasswordResponse {
    pub message: String,
}

/// Identity of the authenticated actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    pub operator_id: i64,
    pub login_name: String,
    pub display_name: String,
    pub role: String,
    /// The tenant linked to this login, if any.
    pub tenant_id: Option<i64>,
}

/// Whether an action is available to the current actor.
///
/// Advisory only, for UI gating; handlers always re-check authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Capability {
    Allowed,
    Denied,
}

impl Capability {
    /// Builds a capability from a boolean check.
    #[must_use]
    pub const fn from_bool(allowed: bool) -> Self {
        if allowed { Self::Allowed } else { Self::Denied }
    }
}

/// Capability flags for the authenticated actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalCapabilities {
    pub can_book_visits: Capability,
    pub can_confirm_visits: Capability,
    pub can_advance_status: Capability,
    pub can_manage_registry: Capability,
    pub can_create_operators: Capability,
    pub can_delete_visits: Capability,
}
