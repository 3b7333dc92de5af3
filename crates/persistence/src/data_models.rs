// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and public data types for the persistence layer.
//!
//! `*Row` structs map directly onto table rows (booleans as integers,
//! companion lists as JSON text). The public `*Data` types expose the same
//! records with native Rust types and, where relevant, joined party data.

use crate::diesel_schema::{
    carriers, incident_attachments, incidents, operators, sessions, tenants, visit_status_history,
    visits,
};
use crate::error::PersistenceError;
use diesel::prelude::*;

// ============================================================================
// Row structs (internal, table-shaped)
// ============================================================================

/// Diesel Queryable struct for visit rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = visits)]
pub(crate) struct VisitRow {
    pub visit_id: i64,
    pub scheduled_at: String,
    pub tenant_id: i64,
    pub carrier_id: Option<i64>,
    pub plate: Option<String>,
    pub driver_name: Option<String>,
    pub driver_national_id: Option<String>,
    pub companions_json: String,
    pub accepted_terms: i32,
    pub requires_confirmation: i32,
    pub status: String,
    pub description: Option<String>,
    pub arrived_at: Option<String>,
    pub unloading_started_at: Option<String>,
    pub finished_at: Option<String>,
    pub departed_at: Option<String>,
    pub created_by: i64,
    pub created_at: String,
}

/// Diesel Queryable struct for carrier rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = carriers)]
pub(crate) struct CarrierRow {
    pub carrier_id: i64,
    pub name: String,
    pub tax_id: String,
}

/// Diesel Queryable struct for tenant rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = tenants)]
pub(crate) struct TenantRow {
    pub tenant_id: i64,
    pub trade_name: String,
    pub legal_name: String,
    pub tax_id: String,
    pub operator_id: Option<i64>,
}

/// Diesel Queryable struct for status history rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = visit_status_history)]
pub(crate) struct VisitStatusHistoryRow {
    pub history_id: i64,
    pub visit_id: i64,
    pub previous_status: String,
    pub new_status: String,
    pub transitioned_at: String,
    pub transitioned_by: i64,
}

/// Diesel Queryable struct for incident rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = incidents)]
pub(crate) struct IncidentRow {
    pub incident_id: i64,
    pub visit_id: i64,
    pub reported_by: i64,
    pub occurred_at: String,
    pub what: String,
    pub why: String,
    pub location: String,
    pub who: String,
    pub how: String,
    pub how_much: Option<String>,
}

/// Diesel Queryable struct for incident attachment rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = incident_attachments)]
pub(crate) struct IncidentAttachmentRow {
    pub attachment_id: i64,
    pub incident_id: i64,
    pub file_name: String,
    pub url: String,
    pub mime_type: String,
}

/// Diesel Queryable struct for operator rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = operators)]
pub(crate) struct OperatorRow {
    pub operator_id: i64,
    pub login_name: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: String,
    pub is_disabled: i32,
    pub created_at: String,
    pub disabled_at: Option<String>,
    pub last_login_at: Option<String>,
}

/// Diesel Queryable struct for session rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = sessions)]
pub(crate) struct SessionRow {
    pub session_id: i64,
    pub session_token: String,
    pub operator_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

// ============================================================================
// Insert payloads (public, supplied by the API layer)
// ============================================================================

/// Field values for a new visit, ready for insertion.
///
/// All timestamps are pre-formatted UTC ISO 8601 strings; the companion
/// list is serialized to JSON at insert time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVisitRecord {
    pub scheduled_at: String,
    pub tenant_id: i64,
    pub carrier_id: Option<i64>,
    pub plate: Option<String>,
    pub driver_name: Option<String>,
    pub driver_national_id: Option<String>,
    pub companions: Vec<String>,
    pub accepted_terms: bool,
    pub requires_confirmation: bool,
    pub status: String,
    pub description: Option<String>,
    pub created_by: i64,
    pub created_at: String,
}

/// Field values for a status transition.
///
/// Carries the full post-transition timestamp set so the update is a single
/// write; the stamping rules live in the core crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitStatusUpdate {
    pub status: String,
    pub arrived_at: Option<String>,
    pub unloading_started_at: Option<String>,
    pub finished_at: Option<String>,
    pub departed_at: Option<String>,
    pub transitioned_at: String,
    pub transitioned_by: i64,
}

/// Field values written by a confirmation.
///
/// `carrier_id = None` leaves the stored carrier untouched, matching the
/// confirmation form where the carrier field is optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitConfirmationUpdate {
    pub carrier_id: Option<i64>,
    pub description: Option<String>,
    pub plate: String,
    pub driver_name: String,
    pub driver_national_id: String,
    pub companions: Vec<String>,
}

/// Field values for a new incident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIncidentRecord {
    pub visit_id: i64,
    pub reported_by: i64,
    pub occurred_at: String,
    pub what: String,
    pub why: String,
    pub location: String,
    pub who: String,
    pub how: String,
    pub how_much: Option<String>,
}

/// Descriptor of a file attached to a new incident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttachmentRecord {
    pub file_name: String,
    pub url: String,
    pub mime_type: String,
}

// ============================================================================
// Public data types (query results)
// ============================================================================

/// A carrier record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierData {
    pub carrier_id: i64,
    pub name: String,
    pub tax_id: String,
}

/// A tenant record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantData {
    pub tenant_id: i64,
    pub trade_name: String,
    pub legal_name: String,
    pub tax_id: String,
    pub operator_id: Option<i64>,
}

/// A visit record joined with its tenant and (optional) carrier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitData {
    pub visit_id: i64,
    pub scheduled_at: String,
    pub tenant: TenantData,
    pub carrier: Option<CarrierData>,
    pub plate: Option<String>,
    pub driver_name: Option<String>,
    pub driver_national_id: Option<String>,
    pub companions: Vec<String>,
    pub accepted_terms: bool,
    pub requires_confirmation: bool,
    pub status: String,
    pub description: Option<String>,
    pub arrived_at: Option<String>,
    pub unloading_started_at: Option<String>,
    pub finished_at: Option<String>,
    pub departed_at: Option<String>,
    pub created_by: i64,
    pub created_at: String,
}

/// One entry in a visit's status history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitStatusHistoryData {
    pub history_id: i64,
    pub visit_id: i64,
    pub previous_status: String,
    pub new_status: String,
    pub transitioned_at: String,
    pub transitioned_by: i64,
}

/// A carrier together with the ids of its associated tenants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierWithTenants {
    pub carrier: CarrierData,
    pub tenant_ids: Vec<i64>,
}

/// A tenant together with its login account state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantAccountData {
    pub tenant: TenantData,
    pub login_name: Option<String>,
    pub login_disabled: Option<bool>,
}

/// An incident joined with its visit summary, reporter, and attachments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentData {
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
    pub location: String,
    pub who: String,
    pub how: String,
    pub how_much: Option<String>,
    pub attachments: Vec<AttachmentData>,
}

/// A stored attachment descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentData {
    pub attachment_id: i64,
    pub file_name: String,
    pub url: String,
    pub mime_type: String,
}

/// Operator account data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorData {
    pub operator_id: i64,
    pub login_name: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: String,
    pub is_disabled: bool,
    pub created_at: String,
    pub disabled_at: Option<String>,
    pub last_login_at: Option<String>,
}

/// Session data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub operator_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

// ============================================================================
// Conversions
// ============================================================================

impl From<CarrierRow> for CarrierData {
    fn from(row: CarrierRow) -> Self {
        Self {
            carrier_id: row.carrier_id,
            name: row.name,
            tax_id: row.tax_id,
        }
    }
}

impl From<TenantRow> for TenantData {
    fn from(row: TenantRow) -> Self {
        Self {
            tenant_id: row.tenant_id,
            trade_name: row.trade_name,
            legal_name: row.legal_name,
            tax_id: row.tax_id,
            operator_id: row.operator_id,
        }
    }
}

impl From<VisitStatusHistoryRow> for VisitStatusHistoryData {
    fn from(row: VisitStatusHistoryRow) -> Self {
        Self {
            history_id: row.history_id,
            visit_id: row.visit_id,
            previous_status: row.previous_status,
            new_status: row.new_status,
            transitioned_at: row.transitioned_at,
            transitioned_by: row.transitioned_by,
        }
    }
}

impl From<IncidentAttachmentRow> for AttachmentData {
    fn from(row: IncidentAttachmentRow) -> Self {
        Self {
            attachment_id: row.attachment_id,
            file_name: row.file_name,
            url: row.url,
            mime_type: row.mime_type,
        }
    }
}

impl From<OperatorRow> for OperatorData {
    fn from(row: OperatorRow) -> Self {
        Self {
            operator_id: row.operator_id,
            login_name: row.login_name,
            display_name: row.display_name,
            password_hash: row.password_hash,
            role: row.role,
            is_disabled: row.is_disabled != 0,
            created_at: row.created_at,
            disabled_at: row.disabled_at,
            last_login_at: row.last_login_at,
        }
    }
}

impl From<SessionRow> for SessionData {
    fn from(row: SessionRow) -> Self {
        Self {
            session_id: row.session_id,
            session_token: row.session_token,
            operator_id: row.operator_id,
            created_at: row.created_at,
            last_activity_at: row.last_activity_at,
            expires_at: row.expires_at,
        }
    }
}

/// Builds a joined `VisitData` from its row parts.
///
/// # Errors
///
/// Returns a `SerializationError` if the stored companion list is not
/// valid JSON.
pub(crate) fn to_visit_data(
    visit: VisitRow,
    tenant: TenantRow,
    carrier: Option<CarrierRow>,
) -> Result<VisitData, PersistenceError> {
    let companions: Vec<String> = serde_json::from_str(&visit.companions_json)?;
    Ok(VisitData {
        visit_id: visit.visit_id,
        scheduled_at: visit.scheduled_at,
        tenant: tenant.into(),
        carrier: carrier.map(Into::into),
        plate: visit.plate,
        driver_name: visit.driver_name,
        driver_national_id: visit.driver_national_id,
        companions,
        accepted_terms: visit.accepted_terms != 0,
        requires_confirmation: visit.requires_confirmation != 0,
        status: visit.status,
        description: visit.description,
        arrived_at: visit.arrived_at,
        unloading_started_at: visit.unloading_started_at,
        finished_at: visit.finished_at,
        departed_at: visit.departed_at,
        created_by: visit.created_by,
        created_at: visit.created_at,
    })
}
