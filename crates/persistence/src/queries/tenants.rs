// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tenant registry query operations.

use crate::data_models::{OperatorRow, TenantAccountData, TenantData, TenantRow};
use crate::diesel_schema::{operators, tenants};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Retrieves a tenant by id.
pub fn get_tenant(conn: &mut _, tenant_id: i64) -> Result<Option<TenantData>, PersistenceError> {
    let row: Option<TenantRow> = tenants::table
        .filter(tenants::tenant_id.eq(tenant_id))
        .select(TenantRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_tenant: {e}")))?;
    Ok(row.map(Into::into))
}

}

backend_fn! {

/// Retrieves the tenant linked to a login operator, if any.
///
/// This is how tenant-facing flows resolve "my tenant" from the
/// authenticated actor.
pub fn get_tenant_by_operator(
    conn: &mut _,
    operator_id: i64,
) -> Result<Option<TenantData>, PersistenceError> {
    let row: Option<TenantRow> = tenants::table
        .filter(tenants::operator_id.eq(operator_id))
        .select(TenantRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_tenant_by_operator: {e}")))?;
    Ok(row.map(Into::into))
}

}

backend_fn! {

/// Lists all tenants with their login account state, ordered by trade name.
pub fn list_tenants_with_accounts(
    conn: &mut _,
) -> Result<Vec<TenantAccountData>, PersistenceError> {
    let rows: Vec<(TenantRow, Option<OperatorRow>)> = tenants::table
        .left_join(operators::table)
        .order(tenants::trade_name.asc())
        .select((TenantRow::as_select(), Option::<OperatorRow>::as_select()))
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_tenants_with_accounts: {e}")))?;

    Ok(rows
        .into_iter()
        .map(|(tenant, operator)| {
            let (login_name, login_disabled) = operator
                .map(|op| (op.login_name, op.is_disabled != 0))
                .map_or((None, None), |(name, disabled)| {
                    (Some(name), Some(disabled))
                });
            TenantAccountData {
                tenant: tenant.into(),
                login_name,
                login_disabled,
            }
        })
        .collect())
}

}
