// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for the persistence layer.
//!
//! This module contains all read-only queries.
//!
//! ## Module Organization
//!
//! - `visits` — Visit reads, capacity counts, status history
//! - `carriers` — Carrier registry reads
//! - `tenants` — Tenant registry reads
//! - `incidents` — Incident log reads
//! - `operators` — Operator and session reads
//!
//! ## Backend-Specific Functions
//!
//! All query functions are generated in backend-specific monomorphic
//! versions, suffixed `_sqlite` and `_mysql`. The `Persistence` adapter in
//! `lib.rs` dispatches to the appropriate version based on the active
//! backend connection.

pub mod carriers;
pub mod incidents;
pub mod operators;
pub mod tenants;
pub mod visits;

pub use carriers::{
    get_carrier_by_tax_id_mysql, get_carrier_by_tax_id_sqlite, get_carrier_mysql,
    get_carrier_sqlite, list_carrier_associations_mysql, list_carrier_associations_sqlite,
    list_carriers_for_tenant_mysql, list_carriers_for_tenant_sqlite, list_carriers_mysql,
    list_carriers_sqlite,
};
pub use incidents::{
    get_incident_mysql, get_incident_sqlite, list_incidents_mysql, list_incidents_sqlite,
};
pub use operators::{
    get_operator_by_id_mysql, get_operator_by_id_sqlite, get_operator_by_login_mysql,
    get_operator_by_login_sqlite, get_session_by_token_mysql, get_session_by_token_sqlite,
    verify_password,
};
pub use tenants::{
    get_tenant_by_operator_mysql, get_tenant_by_operator_sqlite, get_tenant_mysql,
    get_tenant_sqlite, list_tenants_with_accounts_mysql, list_tenants_with_accounts_sqlite,
};
pub use visits::{
    count_visits_in_window_mysql, count_visits_in_window_sqlite, get_visit_history_mysql,
    get_visit_history_sqlite, get_visit_mysql, get_visit_sqlite, list_visits_for_tenant_mysql,
    list_visits_for_tenant_sqlite, list_visits_in_range_mysql, list_visits_in_range_sqlite,
    visit_exists_mysql, visit_exists_sqlite,
};
