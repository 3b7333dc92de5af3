// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Visit mutation operations.
//!
//! The admission mutation is the one place where the capacity invariant is
//! enforced: the window count and the insert execute inside a single write
//! transaction, so two concurrent admissions can never both observe a free
//! slot and exceed the hourly cap.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{NewVisitRecord, VisitConfirmationUpdate, VisitStatusUpdate};
use crate::diesel_schema::{visit_status_history, visits};
use crate::error::PersistenceError;

/// The outcome of a capacity-checked admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionOutcome {
    /// The visit was inserted; carries the new visit id.
    Created(i64),
    /// The window already holds the capacity limit; nothing was written.
    SlotFull {
        /// The number of visits already in the window.
        existing: i64,
    },
}

backend_fn! {

/// Counts the window and inserts the visit. Must run inside a transaction;
/// callers use `admit_visit_sqlite` / `admit_visit_mysql`.
fn admit_visit_in_tx(
    conn: &mut _,
    record: &NewVisitRecord,
    window_start: &str,
    window_end: &str,
    capacity: i64,
) -> Result<AdmissionOutcome, PersistenceError> {
    let existing: i64 = visits::table
        .filter(visits::scheduled_at.ge(window_start))
        .filter(visits::scheduled_at.lt(window_end))
        .count()
        .get_result(conn)?;

    if existing >= capacity {
        debug!(existing, capacity, window_start, "Slot full, rejecting admission");
        return Ok(AdmissionOutcome::SlotFull { existing });
    }

    let companions_json: String = serde_json::to_string(&record.companions)?;

    diesel::insert_into(visits::table)
        .values((
            visits::scheduled_at.eq(&record.scheduled_at),
            visits::tenant_id.eq(record.tenant_id),
            visits::carrier_id.eq(record.carrier_id),
            visits::plate.eq(record.plate.clone()),
            visits::driver_name.eq(record.driver_name.clone()),
            visits::driver_national_id.eq(record.driver_national_id.clone()),
            visits::companions_json.eq(&companions_json),
            visits::accepted_terms.eq(i32::from(record.accepted_terms)),
            visits::requires_confirmation.eq(i32::from(record.requires_confirmation)),
            visits::status.eq(&record.status),
            visits::description.eq(record.description.clone()),
            visits::created_by.eq(record.created_by),
            visits::created_at.eq(&record.created_at),
        ))
        .execute(conn)?;

    let visit_id: i64 = conn.get_last_insert_rowid()?;
    info!(visit_id, scheduled_at = %record.scheduled_at, "Admitted visit");
    Ok(AdmissionOutcome::Created(visit_id))
}

}

/// Admits a visit with an atomic capacity check - `SQLite` version.
///
/// An immediate transaction takes the write lock before the count, so a
/// concurrent admission serializes behind it rather than racing the check.
///
/// # Errors
///
/// Returns an error if the transaction fails.
pub fn admit_visit_sqlite(
    conn: &mut SqliteConnection,
    record: &NewVisitRecord,
    window_start: &str,
    window_end: &str,
    capacity: i64,
) -> Result<AdmissionOutcome, PersistenceError> {
    conn.immediate_transaction(|conn| {
        admit_visit_in_tx_sqlite(conn, record, window_start, window_end, capacity)
    })
}

/// Admits a visit with an atomic capacity check - `MySQL` version.
///
/// The transaction runs at SERIALIZABLE isolation; under `InnoDB` the
/// default REPEATABLE READ would let two admissions count the same window
/// concurrently and both insert.
///
/// # Errors
///
/// Returns an error if the transaction fails.
pub fn admit_visit_mysql(
    conn: &mut MysqlConnection,
    record: &NewVisitRecord,
    window_start: &str,
    window_end: &str,
    capacity: i64,
) -> Result<AdmissionOutcome, PersistenceError> {
    diesel::sql_query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE").execute(conn)?;
    conn.transaction(|conn| {
        admit_visit_in_tx_mysql(conn, record, window_start, window_end, capacity)
    })
}

backend_fn! {

/// Applies a status transition and appends its history row.
///
/// The update writes the full post-transition timestamp set computed by the
/// core lifecycle rules, so a re-applied status carries its original stamp
/// through unchanged. Runs inside a transaction.
///
/// # Errors
///
/// Returns `NotFound` if the visit does not exist.
pub fn update_visit_status(
    conn: &mut _,
    visit_id: i64,
    previous_status: &str,
    update: &VisitStatusUpdate,
) -> Result<(), PersistenceError> {
    conn.transaction(|conn| {
        let affected: usize =
            diesel::update(visits::table.filter(visits::visit_id.eq(visit_id)))
                .set((
                    visits::status.eq(&update.status),
                    visits::arrived_at.eq(update.arrived_at.clone()),
                    visits::unloading_started_at.eq(update.unloading_started_at.clone()),
                    visits::finished_at.eq(update.finished_at.clone()),
                    visits::departed_at.eq(update.departed_at.clone()),
                ))
                .execute(conn)?;

        if affected == 0 {
            return Err(PersistenceError::NotFound(format!(
                "Visit {visit_id} not found"
            )));
        }

        diesel::insert_into(visit_status_history::table)
            .values((
                visit_status_history::visit_id.eq(visit_id),
                visit_status_history::previous_status.eq(previous_status),
                visit_status_history::new_status.eq(&update.status),
                visit_status_history::transitioned_at.eq(&update.transitioned_at),
                visit_status_history::transitioned_by.eq(update.transitioned_by),
            ))
            .execute(conn)?;

        info!(visit_id, status = %update.status, "Updated visit status");
        Ok(())
    })
}

}

backend_fn! {

/// Writes the confirmation fields and clears the confirmation flag.
///
/// When `update.carrier_id` is `None` the stored carrier is left untouched;
/// the confirmation form treats the carrier as optional.
///
/// # Errors
///
/// Returns `NotFound` if the visit does not exist.
pub fn confirm_visit(
    conn: &mut _,
    visit_id: i64,
    update: &VisitConfirmationUpdate,
) -> Result<(), PersistenceError> {
    let target = visits::table.filter(visits::visit_id.eq(visit_id));
    let companions_json: String = serde_json::to_string(&update.companions)?;

    let affected: usize = if let Some(carrier_id) = update.carrier_id {
        diesel::update(target)
            .set((
                visits::requires_confirmation.eq(0),
                visits::carrier_id.eq(Some(carrier_id)),
                visits::description.eq(update.description.clone()),
                visits::plate.eq(Some(update.plate.clone())),
                visits::driver_name.eq(Some(update.driver_name.clone())),
                visits::driver_national_id.eq(Some(update.driver_national_id.clone())),
                visits::companions_json.eq(&companions_json),
            ))
            .execute(conn)?
    } else {
        diesel::update(target)
            .set((
                visits::requires_confirmation.eq(0),
                visits::description.eq(update.description.clone()),
                visits::plate.eq(Some(update.plate.clone())),
                visits::driver_name.eq(Some(update.driver_name.clone())),
                visits::driver_national_id.eq(Some(update.driver_national_id.clone())),
                visits::companions_json.eq(&companions_json),
            ))
            .execute(conn)?
    };

    if affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Visit {visit_id} not found"
        )));
    }

    info!(visit_id, "Confirmed visit");
    Ok(())
}

}

backend_fn! {

/// Deletes a visit and its status history (administrative use only).
///
/// # Errors
///
/// Returns `NotFound` if the visit does not exist. Fails if incidents
/// still reference the visit (the foreign key is intentionally enforced).
pub fn delete_visit(conn: &mut _, visit_id: i64) -> Result<(), PersistenceError> {
    conn.transaction(|conn| {
        diesel::delete(
            visit_status_history::table.filter(visit_status_history::visit_id.eq(visit_id)),
        )
        .execute(conn)?;

        let affected: usize =
            diesel::delete(visits::table.filter(visits::visit_id.eq(visit_id))).execute(conn)?;

        if affected == 0 {
            return Err(PersistenceError::NotFound(format!(
                "Visit {visit_id} not found"
            )));
        }

        info!(visit_id, "Deleted visit");
        Ok(())
    })
}

}
