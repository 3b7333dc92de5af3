// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Visit query operations.
//!
//! All visit reads join the owning tenant and the optional carrier so
//! callers get a complete record in one round trip. Timestamps are stored
//! as UTC ISO 8601 text, so range filters compare lexicographically.

use crate::data_models::{
    CarrierRow, TenantRow, VisitData, VisitRow, VisitStatusHistoryData, VisitStatusHistoryRow,
    to_visit_data,
};
use crate::diesel_schema::{carriers, tenants, visit_status_history, visits};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Counts visits scheduled inside the half-open window `[start, end)`.
///
/// This is the capacity read; at admission time it runs inside the same
/// transaction as the insert (see `mutations::visits`).
pub fn count_visits_in_window(
    conn: &mut _,
    window_start: &str,
    window_end: &str,
) -> Result<i64, PersistenceError> {
    visits::table
        .filter(visits::scheduled_at.ge(window_start))
        .filter(visits::scheduled_at.lt(window_end))
        .count()
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("count_visits_in_window: {e}")))
}

}

backend_fn! {

/// Retrieves a visit by id, joined with its tenant and carrier.
pub fn get_visit(conn: &mut _, visit_id: i64) -> Result<Option<VisitData>, PersistenceError> {
    let row: Option<(VisitRow, TenantRow, Option<CarrierRow>)> = visits::table
        .inner_join(tenants::table)
        .left_join(carriers::table)
        .filter(visits::visit_id.eq(visit_id))
        .select((
            VisitRow::as_select(),
            TenantRow::as_select(),
            Option::<CarrierRow>::as_select(),
        ))
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_visit: {e}")))?;

    row.map(|(visit, tenant, carrier)| to_visit_data(visit, tenant, carrier))
        .transpose()
}

}

backend_fn! {

/// Returns true if a visit with the given id exists.
pub fn visit_exists(conn: &mut _, visit_id: i64) -> Result<bool, PersistenceError> {
    let count: i64 = visits::table
        .filter(visits::visit_id.eq(visit_id))
        .count()
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("visit_exists: {e}")))?;
    Ok(count > 0)
}

}

backend_fn! {

/// Lists visits, optionally restricted to an inclusive scheduled-at range,
/// ordered by scheduled time ascending.
pub fn list_visits_in_range(
    conn: &mut _,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<Vec<VisitData>, PersistenceError> {
    let mut query = visits::table
        .inner_join(tenants::table)
        .left_join(carriers::table)
        .select((
            VisitRow::as_select(),
            TenantRow::as_select(),
            Option::<CarrierRow>::as_select(),
        ))
        .into_boxed();

    if let Some(from) = from {
        query = query.filter(visits::scheduled_at.ge(from.to_string()));
    }
    if let Some(to) = to {
        query = query.filter(visits::scheduled_at.le(to.to_string()));
    }

    let rows: Vec<(VisitRow, TenantRow, Option<CarrierRow>)> = query
        .order(visits::scheduled_at.asc())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_visits_in_range: {e}")))?;

    rows.into_iter()
        .map(|(visit, tenant, carrier)| to_visit_data(visit, tenant, carrier))
        .collect()
}

}

backend_fn! {

/// Lists a tenant's visits in an inclusive range, newest first.
pub fn list_visits_for_tenant(
    conn: &mut _,
    tenant_id: i64,
    from: &str,
    to: &str,
) -> Result<Vec<VisitData>, PersistenceError> {
    let rows: Vec<(VisitRow, TenantRow, Option<CarrierRow>)> = visits::table
        .inner_join(tenants::table)
        .left_join(carriers::table)
        .filter(visits::tenant_id.eq(tenant_id))
        .filter(visits::scheduled_at.ge(from))
        .filter(visits::scheduled_at.le(to))
        .order(visits::scheduled_at.desc())
        .select((
            VisitRow::as_select(),
            TenantRow::as_select(),
            Option::<CarrierRow>::as_select(),
        ))
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_visits_for_tenant: {e}")))?;

    rows.into_iter()
        .map(|(visit, tenant, carrier)| to_visit_data(visit, tenant, carrier))
        .collect()
}

}

backend_fn! {

/// Returns the status history of a visit in transition order.
pub fn get_visit_history(
    conn: &mut _,
    visit_id: i64,
) -> Result<Vec<VisitStatusHistoryData>, PersistenceError> {
    let rows: Vec<VisitStatusHistoryRow> = visit_status_history::table
        .filter(visit_status_history::visit_id.eq(visit_id))
        .order(visit_status_history::history_id.asc())
        .select(VisitStatusHistoryRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("get_visit_history: {e}")))?;

    Ok(rows.into_iter().map(Into::into).collect())
}

}
