// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Each handler validates input, enforces authorization, delegates the
//! decision logic to the core crate, and persists through the injected
//! adapter. Successful writes read the record back joined with its parties
//! so callers always receive the complete state.

use std::str::FromStr;

use time::{Duration, OffsetDateTime};
use tracing::{error, info};

use dock_visit::{
    AdmissionRequest, ConfirmationDetails, LifecycleTimestamps, StatusChange, apply_status,
    plan_confirmation, plan_visit,
};
use dock_visit_domain::{
    Carrier, HOURLY_VISIT_CAPACITY, IncidentReport, Tenant, VisitStatus, format_timestamp,
    parse_timestamp, validate_attachment_count,
};
use dock_visit_persistence::{
    AdmissionOutcome, NewAttachmentRecord, NewIncidentRecord, NewVisitRecord, OperatorData,
    Persistence, PersistenceError, VisitConfirmationUpdate, VisitData, VisitStatusUpdate,
};

use crate::auth::{AuthenticatedActor, AuthorizationService, Role};
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    AttachmentInfo, CarrierInfo, CarrierWithTenantsInfo, ChangePasswordRequest,
    ChangePasswordResponse, ConfirmVisitRequest, CreateCarrierRequest, CreateIncidentRequest,
    CreateOperatorRequest, CreateOperatorResponse, CreateTenantRequest, CreateTenantResponse,
    CreateVisitRequest, IncidentInfo, ListVisitsRequest, RegisterCarrierForTenantRequest,
    TenantAccountInfo, TenantInfo, UpdateCarrierRequest, VisitHistoryEntry, VisitInfo,
    WhoAmIResponse,
};

/// How far back the tenant-facing visit listing reaches.
const TENANT_LISTING_PAST: Duration = Duration::days(7);
/// How far ahead the tenant-facing visit listing reaches.
const TENANT_LISTING_FUTURE: Duration = Duration::days(30);

// ============================================================================
// Conversion helpers
// ============================================================================

fn to_tenant_info(tenant: dock_visit_persistence::TenantData) -> TenantInfo {
    TenantInfo {
        tenant_id: tenant.tenant_id,
        trade_name: tenant.trade_name,
        legal_name: tenant.legal_name,
        tax_id: tenant.tax_id,
    }
}

fn to_carrier_info(carrier: dock_visit_persistence::CarrierData) -> CarrierInfo {
    CarrierInfo {
        carrier_id: carrier.carrier_id,
        name: carrier.name,
        tax_id: carrier.tax_id,
    }
}

fn to_visit_info(visit: VisitData) -> VisitInfo {
    VisitInfo {
        visit_id: visit.visit_id,
        scheduled_at: visit.scheduled_at,
        status: visit.status,
        tenant: to_tenant_info(visit.tenant),
        carrier: visit.carrier.map(to_carrier_info),
        plate: visit.plate,
        driver_name: visit.driver_name,
        driver_national_id: visit.driver_national_id,
        companions: visit.companions,
        accepted_terms: visit.accepted_terms,
        requires_confirmation: visit.requires_confirmation,
        description: visit.description,
        arrived_at: visit.arrived_at,
        unloading_started_at: visit.unloading_started_at,
        finished_at: visit.finished_at,
        departed_at: visit.departed_at,
        created_by: visit.created_by,
        created_at: visit.created_at,
    }
}

fn to_incident_info(incident: dock_visit_persistence::IncidentData) -> IncidentInfo {
    IncidentInfo {
        incident_id: incident.incident_id,
        visit_id: incident.visit_id,
        visit_scheduled_at: incident.visit_scheduled_at,
        visit_status: incident.visit_status,
        tenant_name: incident.tenant_name,
        carrier_name: incident.carrier_name,
        reporter_name: incident.reporter_name,
        occurred_at: incident.occurred_at,
        what: incident.what,
        why: incident.why,
        location: incident.location,
        who: incident.who,
        how: incident.how,
        how_much: incident.how_much,
        attachments: incident
            .attachments
            .into_iter()
            .map(|a| AttachmentInfo {
                file_name: a.file_name,
                url: a.url,
                mime_type: a.mime_type,
            })
            .collect(),
    }
}

/// Maps a persistence failure to an opaque internal error.
///
/// The underlying error is logged; callers only see the context sentence.
fn store_error(context: &str, err: &PersistenceError) -> ApiError {
    error!(error = %err, "{context}");
    ApiError::Internal {
        message: context.to_string(),
    }
}

/// Maps a persistence failure that may be a uniqueness violation to a
/// domain-rule error, falling back to an opaque internal error.
fn unique_or_store_error(
    err: &PersistenceError,
    rule: &str,
    message: &str,
    context: &str,
) -> ApiError {
    let text = err.to_string();
    if text.contains("UNIQUE constraint") || text.contains("Duplicate entry") {
        ApiError::DomainRuleViolation {
            rule: rule.to_string(),
            message: message.to_string(),
        }
    } else {
        store_error(context, err)
    }
}

fn visit_not_found(visit_id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Visit"),
        message: format!("Visit {visit_id} does not exist"),
    }
}

/// Formats a timestamp, translating failures into API errors.
fn format_ts(instant: OffsetDateTime) -> Result<String, ApiError> {
    format_timestamp(instant).map_err(translate_domain_error)
}

/// Parses a stored optional timestamp, translating failures into API errors.
fn parse_stored_ts(value: Option<&str>) -> Result<Option<OffsetDateTime>, ApiError> {
    value
        .map(parse_timestamp)
        .transpose()
        .map_err(|e| ApiError::Internal {
            message: format!("Stored timestamp is unreadable: {e}"),
        })
}

/// Ensures the referenced tenant exists.
fn require_tenant(
    persistence: &mut Persistence,
    tenant_id: i64,
) -> Result<dock_visit_persistence::TenantData, ApiError> {
    persistence
        .get_tenant(tenant_id)
        .map_err(|e| store_error("Failed to look up tenant", &e))?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Tenant"),
            message: format!("Tenant {tenant_id} does not exist"),
        })
}

/// Ensures the referenced carrier exists.
fn require_carrier(
    persistence: &mut Persistence,
    carrier_id: i64,
) -> Result<dock_visit_persistence::CarrierData, ApiError> {
    persistence
        .get_carrier(carrier_id)
        .map_err(|e| store_error("Failed to look up carrier", &e))?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Carrier"),
            message: format!("Carrier {carrier_id} does not exist"),
        })
}

/// Resolves the tenant linked to the authenticated actor.
fn require_actor_tenant(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<dock_visit_persistence::TenantData, ApiError> {
    persistence
        .get_tenant_by_operator(actor.operator_id)
        .map_err(|e| store_error("Failed to look up tenant", &e))?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Tenant"),
            message: String::from("No tenant is linked to this login"),
        })
}

// ============================================================================
// Visits
// ============================================================================

/// Books a visit, enforcing the hourly capacity window.
///
/// Direct bookings must carry valid vehicle/driver details; bookings marked
/// `requires_confirmation` defer them until an operator confirms. The
/// capacity check and the insert are atomic at the store, so the hourly cap
/// of 8 holds under concurrent requests.
///
/// # Errors
///
/// Returns `InvalidInput` for missing/malformed fields, `ResourceNotFound`
/// for unknown tenant/carrier references, and `SlotFull` when the hour
/// window is already at capacity.
pub fn create_visit(
    persistence: &mut Persistence,
    request: &CreateVisitRequest,
    actor: &AuthenticatedActor,
) -> Result<VisitInfo, ApiError> {
    let scheduled_at: OffsetDateTime =
        parse_timestamp(&request.scheduled_at).map_err(translate_domain_error)?;

    let admission = AdmissionRequest {
        scheduled_at,
        tenant_id: request.tenant_id,
        carrier_id: request.carrier_id,
        description: request.description.clone(),
        accepted_terms: request.accepted_terms,
        requires_confirmation: request.requires_confirmation,
        plate: request.plate.clone(),
        driver_name: request.driver_name.clone(),
        driver_national_id: request.driver_national_id.clone(),
        companions: request.companions.clone(),
    };
    let planned = plan_visit(&admission).map_err(translate_core_error)?;

    require_tenant(persistence, planned.tenant_id)?;
    if let Some(carrier_id) = planned.carrier_id {
        require_carrier(persistence, carrier_id)?;
    }

    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let details = planned.vehicle.details();
    let record = NewVisitRecord {
        scheduled_at: format_ts(planned.scheduled_at)?,
        tenant_id: planned.tenant_id,
        carrier_id: planned.carrier_id,
        plate: details.map(|d| d.plate.value().to_string()),
        driver_name: details.map(|d| d.driver_name.clone()),
        driver_national_id: details.map(|d| d.driver_national_id.clone()),
        companions: details.map(|d| d.companions.clone()).unwrap_or_default(),
        accepted_terms: planned.accepted_terms,
        requires_confirmation: planned.vehicle.requires_confirmation(),
        status: planned.status.as_str().to_string(),
        description: planned.description.clone(),
        created_by: actor.operator_id,
        created_at: format_ts(now)?,
    };

    let window_start = format_ts(planned.window.start())?;
    let window_end = format_ts(planned.window.end())?;
    let outcome = persistence
        .admit_visit(&record, &window_start, &window_end, HOURLY_VISIT_CAPACITY)
        .map_err(|e| store_error("Failed to admit visit", &e))?;

    let visit_id = match outcome {
        AdmissionOutcome::Created(visit_id) => visit_id,
        AdmissionOutcome::SlotFull { existing } => {
            return Err(ApiError::SlotFull {
                window_start,
                existing,
            });
        }
    };

    info!(visit_id, actor = %actor.login_name, "Booked visit");

    let visit = persistence
        .get_visit(visit_id)
        .map_err(|e| store_error("Failed to read back visit", &e))?
        .ok_or_else(|| visit_not_found(visit_id))?;
    Ok(to_visit_info(visit))
}

/// Lists visits, optionally restricted to an inclusive range.
///
/// # Errors
///
/// Returns `InvalidInput` for unparseable bounds.
pub fn list_visits(
    persistence: &mut Persistence,
    request: &ListVisitsRequest,
) -> Result<Vec<VisitInfo>, ApiError> {
    // Normalize the bounds so the lexicographic range filter is sound.
    let from = request
        .from
        .as_deref()
        .map(|v| parse_timestamp(v).and_then(format_timestamp))
        .transpose()
        .map_err(translate_domain_error)?;
    let to = request
        .to
        .as_deref()
        .map(|v| parse_timestamp(v).and_then(format_timestamp))
        .transpose()
        .map_err(translate_domain_error)?;

    let visits = persistence
        .list_visits_in_range(from.as_deref(), to.as_deref())
        .map_err(|e| store_error("Failed to list visits", &e))?;
    Ok(visits.into_iter().map(to_visit_info).collect())
}

/// Lists the authenticated tenant's visits in the standard window
/// (7 days back, 30 days ahead), newest first.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no tenant is linked to the actor.
pub fn list_my_visits(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<Vec<VisitInfo>, ApiError> {
    let tenant = require_actor_tenant(persistence, actor)?;

    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let from = format_ts(now - TENANT_LISTING_PAST)?;
    let to = format_ts(now + TENANT_LISTING_FUTURE)?;

    let visits = persistence
        .list_visits_for_tenant(tenant.tenant_id, &from, &to)
        .map_err(|e| store_error("Failed to list visits", &e))?;
    Ok(visits.into_iter().map(to_visit_info).collect())
}

/// Advances a visit to the given status, stamping its event time.
///
/// Any of the five statuses may be applied at any time (operators use this
/// to correct mis-clicks); each lifecycle timestamp records the first time
/// its status was reached and is never overwritten.
///
/// # Errors
///
/// Returns `Unauthorized` for tenant actors, `InvalidInput` for unknown
/// status values, and `ResourceNotFound` for unknown visits.
pub fn advance_visit_status(
    persistence: &mut Persistence,
    visit_id: i64,
    target_status: &str,
    actor: &AuthenticatedActor,
) -> Result<VisitInfo, ApiError> {
    AuthorizationService::authorize_advance_status(actor)?;

    let target: VisitStatus =
        VisitStatus::from_str(target_status).map_err(translate_domain_error)?;

    let visit = persistence
        .get_visit(visit_id)
        .map_err(|e| store_error("Failed to look up visit", &e))?
        .ok_or_else(|| visit_not_found(visit_id))?;

    let current = LifecycleTimestamps {
        arrived_at: parse_stored_ts(visit.arrived_at.as_deref())?,
        unloading_started_at: parse_stored_ts(visit.unloading_started_at.as_deref())?,
        finished_at: parse_stored_ts(visit.finished_at.as_deref())?,
        departed_at: parse_stored_ts(visit.departed_at.as_deref())?,
    };

    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let change: StatusChange = apply_status(&current, target, now);

    let update = VisitStatusUpdate {
        status: change.status.as_str().to_string(),
        arrived_at: change.timestamps.arrived_at.map(format_ts).transpose()?,
        unloading_started_at: change
            .timestamps
            .unloading_started_at
            .map(format_ts)
            .transpose()?,
        finished_at: change.timestamps.finished_at.map(format_ts).transpose()?,
        departed_at: change.timestamps.departed_at.map(format_ts).transpose()?,
        transitioned_at: format_ts(now)?,
        transitioned_by: actor.operator_id,
    };

    persistence
        .update_visit_status(visit_id, &visit.status, &update)
        .map_err(|e| match e {
            PersistenceError::NotFound(_) => visit_not_found(visit_id),
            other => store_error("Failed to update visit status", &other),
        })?;

    info!(visit_id, status = %change.status, actor = %actor.login_name, "Advanced visit status");

    let updated = persistence
        .get_visit(visit_id)
        .map_err(|e| store_error("Failed to read back visit", &e))?
        .ok_or_else(|| visit_not_found(visit_id))?;
    Ok(to_visit_info(updated))
}

/// Confirms a confirmation-pending visit, supplying the deferred
/// vehicle/driver details.
///
/// Idempotent: confirming an already-confirmed visit overwrites the same
/// fields. Status and lifecycle timestamps are untouched.
///
/// # Errors
///
/// Returns `Unauthorized` unless the actor may confirm visits,
/// `InvalidInput` for a malformed plate or missing driver fields, and
/// `ResourceNotFound` for unknown visits or carriers.
pub fn confirm_visit(
    persistence: &mut Persistence,
    visit_id: i64,
    request: &ConfirmVisitRequest,
    actor: &AuthenticatedActor,
) -> Result<VisitInfo, ApiError> {
    AuthorizationService::authorize_confirm_visit(actor)?;

    let details = ConfirmationDetails {
        carrier_id: request.carrier_id,
        description: request.description.clone(),
        plate: request.plate.clone(),
        driver_name: request.driver_name.clone(),
        driver_national_id: request.driver_national_id.clone(),
        companions: request.companions.clone(),
    };
    let vehicle = plan_confirmation(&details).map_err(translate_core_error)?;

    persistence
        .get_visit(visit_id)
        .map_err(|e| store_error("Failed to look up visit", &e))?
        .ok_or_else(|| visit_not_found(visit_id))?;
    if let Some(carrier_id) = request.carrier_id {
        require_carrier(persistence, carrier_id)?;
    }

    let update = VisitConfirmationUpdate {
        carrier_id: request.carrier_id,
        description: request.description.clone(),
        plate: vehicle.plate.value().to_string(),
        driver_name: vehicle.driver_name.clone(),
        driver_national_id: vehicle.driver_national_id.clone(),
        companions: vehicle.companions.clone(),
    };
    persistence
        .confirm_visit(visit_id, &update)
        .map_err(|e| match e {
            PersistenceError::NotFound(_) => visit_not_found(visit_id),
            other => store_error("Failed to confirm visit", &other),
        })?;

    info!(visit_id, actor = %actor.login_name, "Confirmed visit");

    let visit = persistence
        .get_visit(visit_id)
        .map_err(|e| store_error("Failed to read back visit", &e))?
        .ok_or_else(|| visit_not_found(visit_id))?;
    Ok(to_visit_info(visit))
}

/// Returns the status history of a visit in transition order.
///
/// # Errors
///
/// Returns `ResourceNotFound` for unknown visits.
pub fn visit_history(
    persistence: &mut Persistence,
    visit_id: i64,
) -> Result<Vec<VisitHistoryEntry>, ApiError> {
    let exists = persistence
        .visit_exists(visit_id)
        .map_err(|e| store_error("Failed to look up visit", &e))?;
    if !exists {
        return Err(visit_not_found(visit_id));
    }

    let history = persistence
        .get_visit_history(visit_id)
        .map_err(|e| store_error("Failed to read visit history", &e))?;
    Ok(history
        .into_iter()
        .map(|entry| VisitHistoryEntry {
            previous_status: entry.previous_status,
            new_status: entry.new_status,
            transitioned_at: entry.transitioned_at,
            transitioned_by: entry.transitioned_by,
        })
        .collect())
}

/// Deletes a visit (administrative correction).
///
/// # Errors
///
/// Returns `Unauthorized` unless the actor is an admin and
/// `ResourceNotFound` for unknown visits.
pub fn delete_visit(
    persistence: &mut Persistence,
    visit_id: i64,
    actor: &AuthenticatedActor,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_delete_visit(actor)?;

    persistence.delete_visit(visit_id).map_err(|e| match e {
        PersistenceError::NotFound(_) => visit_not_found(visit_id),
        other => store_error("Failed to delete visit", &other),
    })?;

    info!(visit_id, actor = %actor.login_name, "Deleted visit");
    Ok(())
}

// ============================================================================
// Carriers
// ============================================================================

/// Registers (or re-registers) a carrier and associates it with tenants.
///
/// # Errors
///
/// Returns `Unauthorized` unless the actor may manage the registry and
/// `InvalidInput` for empty name/tax id.
pub fn create_carrier(
    persistence: &mut Persistence,
    request: &CreateCarrierRequest,
    actor: &AuthenticatedActor,
) -> Result<CarrierInfo, ApiError> {
    AuthorizationService::authorize_manage_registry(actor)?;

    let carrier =
        Carrier::new(&request.name, &request.tax_id).map_err(translate_domain_error)?;
    for tenant_id in &request.tenant_ids {
        require_tenant(persistence, *tenant_id)?;
    }

    let carrier_id = persistence
        .upsert_carrier(carrier.name(), carrier.tax_id(), &request.tenant_ids)
        .map_err(|e| store_error("Failed to register carrier", &e))?;

    info!(carrier_id, actor = %actor.login_name, "Registered carrier");

    let stored = require_carrier(persistence, carrier_id)?;
    Ok(to_carrier_info(stored))
}

/// Registers a carrier on behalf of the authenticated tenant and
/// associates it with that tenant only.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no tenant is linked to the actor and
/// `InvalidInput` for empty name/tax id.
pub fn register_carrier_for_tenant(
    persistence: &mut Persistence,
    request: &RegisterCarrierForTenantRequest,
    actor: &AuthenticatedActor,
) -> Result<CarrierInfo, ApiError> {
    let tenant = require_actor_tenant(persistence, actor)?;
    let carrier =
        Carrier::new(&request.name, &request.tax_id).map_err(translate_domain_error)?;

    let carrier_id = persistence
        .upsert_carrier(carrier.name(), carrier.tax_id(), &[tenant.tenant_id])
        .map_err(|e| store_error("Failed to register carrier", &e))?;

    info!(carrier_id, tenant_id = tenant.tenant_id, "Tenant registered carrier");

    let stored = require_carrier(persistence, carrier_id)?;
    Ok(to_carrier_info(stored))
}

/// Updates a carrier and replaces its tenant associations.
///
/// # Errors
///
/// Returns `Unauthorized` unless the actor may manage the registry,
/// `ResourceNotFound` for unknown carriers/tenants, and a domain-rule
/// violation if the new tax id is already taken.
pub fn update_carrier(
    persistence: &mut Persistence,
    carrier_id: i64,
    request: &UpdateCarrierRequest,
    actor: &AuthenticatedActor,
) -> Result<CarrierInfo, ApiError> {
    AuthorizationService::authorize_manage_registry(actor)?;

    let carrier =
        Carrier::new(&request.name, &request.tax_id).map_err(translate_domain_error)?;
    for tenant_id in &request.tenant_ids {
        require_tenant(persistence, *tenant_id)?;
    }

    persistence
        .update_carrier(carrier_id, carrier.name(), carrier.tax_id(), &request.tenant_ids)
        .map_err(|e| match e {
            PersistenceError::NotFound(_) => ApiError::ResourceNotFound {
                resource_type: String::from("Carrier"),
                message: format!("Carrier {carrier_id} does not exist"),
            },
            other => unique_or_store_error(
                &other,
                "unique_carrier_tax_id",
                "The tax id is already in use by another carrier",
                "Failed to update carrier",
            ),
        })?;

    info!(carrier_id, actor = %actor.login_name, "Updated carrier");

    let stored = require_carrier(persistence, carrier_id)?;
    Ok(to_carrier_info(stored))
}

/// Lists all carriers with their associated tenant ids.
///
/// # Errors
///
/// Returns an internal error if the store fails.
pub fn list_carriers(persistence: &mut Persistence) -> Result<Vec<CarrierWithTenantsInfo>, ApiError> {
    let carriers = persistence
        .list_carriers_with_tenants()
        .map_err(|e| store_error("Failed to list carriers", &e))?;
    Ok(carriers
        .into_iter()
        .map(|entry| CarrierWithTenantsInfo {
            carrier: to_carrier_info(entry.carrier),
            tenant_ids: entry.tenant_ids,
        })
        .collect())
}

/// Lists the carriers associated with the authenticated tenant.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no tenant is linked to the actor.
pub fn list_my_carriers(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<Vec<CarrierInfo>, ApiError> {
    let tenant = require_actor_tenant(persistence, actor)?;
    let carriers = persistence
        .list_carriers_for_tenant(tenant.tenant_id)
        .map_err(|e| store_error("Failed to list carriers", &e))?;
    Ok(carriers.into_iter().map(to_carrier_info).collect())
}

// ============================================================================
// Tenants
// ============================================================================

/// Creates a tenant and provisions its login operator.
///
/// The login name is derived from the tax id (`ruc<tax_id>`) and a
/// temporary password is generated and returned once.
///
/// # Errors
///
/// Returns `Unauthorized` unless the actor may manage the registry,
/// `InvalidInput` for empty fields, and a domain-rule violation for a
/// duplicate tax id.
pub fn create_tenant(
    persistence: &mut Persistence,
    request: &CreateTenantRequest,
    actor: &AuthenticatedActor,
) -> Result<CreateTenantResponse, ApiError> {
    AuthorizationService::authorize_manage_registry(actor)?;

    let tenant = Tenant::new(&request.trade_name, &request.legal_name, &request.tax_id)
        .map_err(translate_domain_error)?;

    let login_name = format!("ruc{}", tenant.tax_id());
    let temp_password = generate_temp_password();

    let (tenant_id, _operator_id) = persistence
        .create_tenant_with_login(
            tenant.trade_name(),
            tenant.legal_name(),
            tenant.tax_id(),
            &login_name,
            &temp_password,
        )
        .map_err(|e| {
            unique_or_store_error(
                &e,
                "unique_tenant_tax_id",
                "A tenant with this tax id already exists",
                "Failed to create tenant",
            )
        })?;

    info!(tenant_id, actor = %actor.login_name, "Created tenant");

    let stored = require_tenant(persistence, tenant_id)?;
    Ok(CreateTenantResponse {
        tenant: to_tenant_info(stored),
        login_name: login_name.to_uppercase(),
        temp_password,
    })
}

/// Lists all tenants with their login account state.
///
/// # Errors
///
/// Returns `Unauthorized` unless the actor may manage the registry.
pub fn list_tenants(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<Vec<TenantAccountInfo>, ApiError> {
    AuthorizationService::authorize_manage_registry(actor)?;

    let tenants = persistence
        .list_tenants_with_accounts()
        .map_err(|e| store_error("Failed to list tenants", &e))?;
    Ok(tenants
        .into_iter()
        .map(|entry| TenantAccountInfo {
            tenant: to_tenant_info(entry.tenant),
            login_name: entry.login_name,
            login_disabled: entry.login_disabled,
        })
        .collect())
}

/// Returns the tenant linked to the authenticated actor.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no tenant is linked to the actor.
pub fn get_my_tenant(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<TenantInfo, ApiError> {
    let tenant = require_actor_tenant(persistence, actor)?;
    Ok(to_tenant_info(tenant))
}

/// Generates an 8-character alphanumeric temporary password.
fn generate_temp_password() -> String {
    use rand::RngExt;
    use rand::distr::Alphanumeric;
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect()
}

// ============================================================================
// Incidents
// ============================================================================

/// Records a 5W2H incident against a visit.
///
/// The referenced visit is never mutated.
///
/// # Errors
///
/// Returns `InvalidInput` for missing mandatory fields or too many
/// attachments, and `ResourceNotFound` for unknown visits.
pub fn create_incident(
    persistence: &mut Persistence,
    request: &CreateIncidentRequest,
    actor: &AuthenticatedActor,
) -> Result<IncidentInfo, ApiError> {
    let report = IncidentReport::new(
        &request.what,
        &request.why,
        &request.location,
        &request.who,
        &request.how,
        request.how_much.clone(),
    )
    .map_err(translate_domain_error)?;
    validate_attachment_count(request.attachments.len()).map_err(translate_domain_error)?;

    let exists = persistence
        .visit_exists(request.visit_id)
        .map_err(|e| store_error("Failed to look up visit", &e))?;
    if !exists {
        return Err(visit_not_found(request.visit_id));
    }

    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let record = NewIncidentRecord {
        visit_id: request.visit_id,
        reported_by: actor.operator_id,
        occurred_at: format_ts(now)?,
        what: report.what,
        why: report.why,
        location: report.location,
        who: report.who,
        how: report.how,
        how_much: report.how_much,
    };
    let attachments: Vec<NewAttachmentRecord> = request
        .attachments
        .iter()
        .map(|a| NewAttachmentRecord {
            file_name: a.file_name.clone(),
            url: a.url.clone(),
            mime_type: a.mime_type.clone(),
        })
        .collect();

    let incident_id = persistence
        .insert_incident(&record, &attachments)
        .map_err(|e| store_error("Failed to record incident", &e))?;

    info!(incident_id, visit_id = request.visit_id, "Recorded incident");

    let incident = persistence
        .get_incident(incident_id)
        .map_err(|e| store_error("Failed to read back incident", &e))?
        .ok_or_else(|| ApiError::Internal {
            message: format!("Incident {incident_id} vanished after insert"),
        })?;
    Ok(to_incident_info(incident))
}

/// Lists all incidents, newest first.
///
/// # Errors
///
/// Returns an internal error if the store fails.
pub fn list_incidents(persistence: &mut Persistence) -> Result<Vec<IncidentInfo>, ApiError> {
    let incidents = persistence
        .list_incidents()
        .map_err(|e| store_error("Failed to list incidents", &e))?;
    Ok(incidents.into_iter().map(to_incident_info).collect())
}

// ============================================================================
// Operators
// ============================================================================

/// Creates an operator account (Admin only).
///
/// # Errors
///
/// Returns `Unauthorized` for non-admins, `InvalidInput` for unknown roles,
/// a password-policy violation for weak passwords, and a domain-rule
/// violation for duplicate login names.
pub fn create_operator(
    persistence: &mut Persistence,
    request: &CreateOperatorRequest,
    actor: &AuthenticatedActor,
) -> Result<CreateOperatorResponse, ApiError> {
    AuthorizationService::authorize_create_operator(actor)?;

    let role: Role = Role::parse(&request.role).map_err(|_| ApiError::InvalidInput {
        field: String::from("role"),
        message: format!("Unknown role: '{}'", request.role),
    })?;

    PasswordPolicy::default().validate(
        &request.password,
        &request.confirmation,
        &request.login_name,
        &request.display_name,
    )?;

    let operator_id = persistence
        .create_operator(
            &request.login_name,
            &request.display_name,
            &request.password,
            role.as_str(),
        )
        .map_err(|e| {
            unique_or_store_error(
                &e,
                "unique_login_name",
                "An operator with this login name already exists",
                "Failed to create operator",
            )
        })?;

    info!(operator_id, actor = %actor.login_name, "Created operator");

    Ok(CreateOperatorResponse {
        operator_id,
        login_name: request.login_name.to_uppercase(),
    })
}

/// Changes the authenticated operator's password.
///
/// # Errors
///
/// Returns `AuthenticationFailed` if the current password is wrong and a
/// password-policy violation if the new password is weak.
pub fn change_password(
    persistence: &mut Persistence,
    request: &ChangePasswordRequest,
    actor: &AuthenticatedActor,
    operator: &OperatorData,
) -> Result<ChangePasswordResponse, ApiError> {
    let current_matches =
        dock_visit_persistence::verify_password(&request.current_password, &operator.password_hash)
            .map_err(|e| store_error("Failed to verify password", &e))?;
    if !current_matches {
        return Err(ApiError::AuthenticationFailed {
            reason: String::from("Current password is incorrect"),
        });
    }

    PasswordPolicy::default().validate(
        &request.new_password,
        &request.confirmation,
        &operator.login_name,
        &operator.display_name,
    )?;

    persistence
        .update_password(actor.operator_id, &request.new_password)
        .map_err(|e| store_error("Failed to update password", &e))?;

    info!(operator_id = actor.operator_id, "Changed password");

    Ok(ChangePasswordResponse {
        message: String::from("Password updated"),
    })
}

/// Returns the identity of the authenticated actor.
///
/// # Errors
///
/// Returns an internal error if the store fails.
pub fn whoami(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    operator: &OperatorData,
) -> Result<WhoAmIResponse, ApiError> {
    let tenant = persistence
        .get_tenant_by_operator(actor.operator_id)
        .map_err(|e| store_error("Failed to look up tenant", &e))?;

    Ok(WhoAmIResponse {
        operator_id: actor.operator_id,
        login_name: operator.login_name.clone(),
        display_name: operator.display_name.clone(),
        role: actor.role.as_str().to_string(),
        tenant_id: tenant.map(|t| t.tenant_id),
    })
}
