// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tenant registry mutations.
//!
//! Creating a tenant also provisions its login operator, in the same
//! transaction, so a tenant never exists without a way to sign in.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{operators, tenants};
use crate::error::PersistenceError;

backend_fn! {

/// Creates a tenant together with its login operator.
///
/// The operator is created with the `Tenant` role and the supplied
/// temporary password (bcrypt-hashed); the login name is normalized to
/// uppercase like every other operator login.
///
/// Returns `(tenant_id, operator_id)`.
///
/// # Errors
///
/// Returns an error if either insert fails (e.g., duplicate tax id or
/// login name); nothing is written in that case.
pub fn create_tenant_with_login(
    conn: &mut _,
    trade_name: &str,
    legal_name: &str,
    tax_id: &str,
    login_name: &str,
    temp_password: &str,
) -> Result<(i64, i64), PersistenceError> {
    conn.transaction(|conn| {
        let normalized_login: String = login_name.to_uppercase();
        let password_hash: String = bcrypt::hash(temp_password, bcrypt::DEFAULT_COST)
            .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

        diesel::insert_into(operators::table)
            .values((
                operators::login_name.eq(&normalized_login),
                operators::display_name.eq(trade_name),
                operators::password_hash.eq(&password_hash),
                operators::role.eq("Tenant"),
            ))
            .execute(conn)?;

        let operator_id: i64 = conn.get_last_insert_rowid()?;

        diesel::insert_into(tenants::table)
            .values((
                tenants::trade_name.eq(trade_name),
                tenants::legal_name.eq(legal_name),
                tenants::tax_id.eq(tax_id),
                tenants::operator_id.eq(Some(operator_id)),
            ))
            .execute(conn)?;

        let tenant_id: i64 = conn.get_last_insert_rowid()?;

        info!(tenant_id, operator_id, "Created tenant with login");
        Ok((tenant_id, operator_id))
    })
}

}
