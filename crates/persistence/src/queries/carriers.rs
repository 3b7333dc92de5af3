// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Carrier registry query operations.

use crate::data_models::{CarrierData, CarrierRow};
use crate::diesel_schema::{carrier_tenants, carriers};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Retrieves a carrier by id.
pub fn get_carrier(
    conn: &mut _,
    carrier_id: i64,
) -> Result<Option<CarrierData>, PersistenceError> {
    let row: Option<CarrierRow> = carriers::table
        .filter(carriers::carrier_id.eq(carrier_id))
        .select(CarrierRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_carrier: {e}")))?;
    Ok(row.map(Into::into))
}

}

backend_fn! {

/// Retrieves a carrier by its unique tax id.
pub fn get_carrier_by_tax_id(
    conn: &mut _,
    tax_id: &str,
) -> Result<Option<CarrierData>, PersistenceError> {
    let row: Option<CarrierRow> = carriers::table
        .filter(carriers::tax_id.eq(tax_id))
        .select(CarrierRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_carrier_by_tax_id: {e}")))?;
    Ok(row.map(Into::into))
}

}

backend_fn! {

/// Lists all carriers ordered by name.
pub fn list_carriers(conn: &mut _) -> Result<Vec<CarrierData>, PersistenceError> {
    let rows: Vec<CarrierRow> = carriers::table
        .order(carriers::name.asc())
        .select(CarrierRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_carriers: {e}")))?;
    Ok(rows.into_iter().map(Into::into).collect())
}

}

backend_fn! {

/// Lists all carrier/tenant association pairs.
///
/// Callers group the pairs in memory to attach tenant ids to carriers.
pub fn list_carrier_associations(conn: &mut _) -> Result<Vec<(i64, i64)>, PersistenceError> {
    carrier_tenants::table
        .select((carrier_tenants::carrier_id, carrier_tenants::tenant_id))
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_carrier_associations: {e}")))
}

}

backend_fn! {

/// Lists the carriers associated with a tenant, ordered by name.
pub fn list_carriers_for_tenant(
    conn: &mut _,
    tenant_id: i64,
) -> Result<Vec<CarrierData>, PersistenceError> {
    let rows: Vec<CarrierRow> = carriers::table
        .inner_join(carrier_tenants::table)
        .filter(carrier_tenants::tenant_id.eq(tenant_id))
        .order(carriers::name.asc())
        .select(CarrierRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_carriers_for_tenant: {e}")))?;
    Ok(rows.into_iter().map(Into::into).collect())
}

}
