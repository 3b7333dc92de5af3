// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Carrier registry mutations.
//!
//! Carriers are keyed by tax id: creating a carrier whose tax id already
//! exists updates the stored name instead of failing, which is how the
//! registry absorbs re-registration from multiple tenants.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{carrier_tenants, carriers};
use crate::error::PersistenceError;

backend_fn! {

/// Creates or updates a carrier by tax id and extends its tenant
/// associations. Existing associations are kept.
///
/// Runs inside a transaction; returns the carrier id.
///
/// # Errors
///
/// Returns an error if any write fails.
pub fn upsert_carrier(
    conn: &mut _,
    name: &str,
    tax_id: &str,
    tenant_ids: &[i64],
) -> Result<i64, PersistenceError> {
    conn.transaction(|conn| {
        let existing: Option<i64> = carriers::table
            .filter(carriers::tax_id.eq(tax_id))
            .select(carriers::carrier_id)
            .first(conn)
            .optional()?;

        let carrier_id: i64 = if let Some(carrier_id) = existing {
            diesel::update(carriers::table.filter(carriers::carrier_id.eq(carrier_id)))
                .set(carriers::name.eq(name))
                .execute(conn)?;
            carrier_id
        } else {
            diesel::insert_into(carriers::table)
                .values((carriers::name.eq(name), carriers::tax_id.eq(tax_id)))
                .execute(conn)?;
            conn.get_last_insert_rowid()?
        };

        let associated: Vec<i64> = carrier_tenants::table
            .filter(carrier_tenants::carrier_id.eq(carrier_id))
            .select(carrier_tenants::tenant_id)
            .load(conn)?;

        for tenant_id in tenant_ids {
            if !associated.contains(tenant_id) {
                diesel::insert_into(carrier_tenants::table)
                    .values((
                        carrier_tenants::carrier_id.eq(carrier_id),
                        carrier_tenants::tenant_id.eq(tenant_id),
                    ))
                    .execute(conn)?;
            }
        }

        info!(carrier_id, tax_id, "Upserted carrier");
        Ok(carrier_id)
    })
}

}

backend_fn! {

/// Updates a carrier and replaces its tenant associations.
///
/// Runs inside a transaction.
///
/// # Errors
///
/// Returns `NotFound` if the carrier does not exist, or a database error
/// if the new tax id collides with another carrier.
pub fn update_carrier(
    conn: &mut _,
    carrier_id: i64,
    name: &str,
    tax_id: &str,
    tenant_ids: &[i64],
) -> Result<(), PersistenceError> {
    conn.transaction(|conn| {
        let affected: usize =
            diesel::update(carriers::table.filter(carriers::carrier_id.eq(carrier_id)))
                .set((carriers::name.eq(name), carriers::tax_id.eq(tax_id)))
                .execute(conn)?;

        if affected == 0 {
            return Err(PersistenceError::NotFound(format!(
                "Carrier {carrier_id} not found"
            )));
        }

        diesel::delete(carrier_tenants::table.filter(carrier_tenants::carrier_id.eq(carrier_id)))
            .execute(conn)?;

        for tenant_id in tenant_ids {
            diesel::insert_into(carrier_tenants::table)
                .values((
                    carrier_tenants::carrier_id.eq(carrier_id),
                    carrier_tenants::tenant_id.eq(tenant_id),
                ))
                .execute(conn)?;
        }

        info!(carrier_id, "Updated carrier");
        Ok(())
    })
}

}
