// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the dock visit scheduling system.
//!
//! This crate translates requests into core commands, enforces
//! authentication and authorization, and maps lower-layer errors into the
//! API error contract. Handlers take the persistence adapter explicitly;
//! there is no global store client.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod auth;
mod capabilities;
mod csv_export;
mod error;
mod handlers;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService, Role};
pub use capabilities::compute_global_capabilities;
pub use csv_export::export_visits_csv;
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use handlers::{
    advance_visit_status, change_password, confirm_visit, create_carrier, create_incident,
    create_operator, create_tenant, create_visit, delete_visit, get_my_tenant, list_carriers,
    list_incidents, list_my_carriers, list_my_visits, list_tenants, list_visits,
    register_carrier_for_tenant, update_carrier, visit_history, whoami,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    AttachmentInfo, Capability, CarrierInfo, CarrierWithTenantsInfo, ChangePasswordRequest,
    ChangePasswordResponse, ConfirmVisitRequest, CreateCarrierRequest, CreateIncidentRequest,
    CreateOperatorRequest, CreateOperatorResponse, CreateTenantRequest, CreateTenantResponse,
    CreateVisitRequest, GlobalCapabilities, IncidentInfo, ListVisitsRequest,
    RegisterCarrierForTenantRequest, TenantAccountInfo, TenantInfo, UpdateCarrierRequest,
    VisitHistoryEntry, VisitInfo, WhoAmIResponse,
};
