// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-agnostic mutation modules.
//!
//! This module contains all state-changing operations for the persistence
//! layer. Most mutations use Diesel DSL and are backend-agnostic, with
//! minimal use of backend-specific helpers (e.g., `last_insert_rowid()`).
//!
//! ## Module Organization
//!
//! - `visits` — Capacity-checked admission, status transitions, confirmation
//! - `carriers` — Carrier upserts and tenant associations
//! - `tenants` — Tenant creation with login provisioning
//! - `incidents` — Incident and attachment persistence
//! - `operators` — Operator and session mutations
//!
//! ## Transactions
//!
//! Multi-step mutations run inside a transaction so a mid-write failure
//! leaves no partial record. The admission path additionally needs the
//! count-then-insert sequence to be atomic against concurrent admissions,
//! which requires backend-specific transaction setup; see
//! `visits::admit_visit_sqlite` / `visits::admit_visit_mysql`.

pub mod carriers;
pub mod incidents;
pub mod operators;
pub mod tenants;
pub mod visits;

pub use carriers::{
    update_carrier_mysql, update_carrier_sqlite, upsert_carrier_mysql, upsert_carrier_sqlite,
};
pub use incidents::{insert_incident_mysql, insert_incident_sqlite};
pub use operators::{
    create_operator_mysql, create_operator_sqlite, create_session_mysql, create_session_sqlite,
    delete_session_mysql, delete_session_sqlite, update_last_login_mysql,
    update_last_login_sqlite, update_password_mysql, update_password_sqlite,
    update_session_activity_mysql, update_session_activity_sqlite,
};
pub use tenants::{create_tenant_with_login_mysql, create_tenant_with_login_sqlite};
pub use visits::{
    AdmissionOutcome, admit_visit_mysql, admit_visit_sqlite, confirm_visit_mysql,
    confirm_visit_sqlite, delete_visit_mysql, delete_visit_sqlite, update_visit_status_mysql,
    update_visit_status_sqlite,
};
