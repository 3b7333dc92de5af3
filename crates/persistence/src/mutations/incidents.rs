// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Incident log mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::{NewAttachmentRecord, NewIncidentRecord};
use crate::diesel_schema::{incident_attachments, incidents};
use crate::error::PersistenceError;

backend_fn! {

/// Inserts an incident and its attachment descriptors.
///
/// Runs inside a transaction; returns the incident id.
///
/// # Errors
///
/// Returns an error if any insert fails (including a missing visit,
/// rejected by the foreign key).
pub fn insert_incident(
    conn: &mut _,
    record: &NewIncidentRecord,
    attachments: &[NewAttachmentRecord],
) -> Result<i64, PersistenceError> {
    conn.transaction(|conn| {
        diesel::insert_into(incidents::table)
            .values((
                incidents::visit_id.eq(record.visit_id),
                incidents::reported_by.eq(record.reported_by),
                incidents::occurred_at.eq(&record.occurred_at),
                incidents::what.eq(&record.what),
                incidents::why.eq(&record.why),
                incidents::location.eq(&record.location),
                incidents::who.eq(&record.who),
                incidents::how.eq(&record.how),
                incidents::how_much.eq(record.how_much.clone()),
            ))
            .execute(conn)?;

        let incident_id: i64 = conn.get_last_insert_rowid()?;

        for attachment in attachments {
            diesel::insert_into(incident_attachments::table)
                .values((
                    incident_attachments::incident_id.eq(incident_id),
                    incident_attachments::file_name.eq(&attachment.file_name),
                    incident_attachments::url.eq(&attachment.url),
                    incident_attachments::mime_type.eq(&attachment.mime_type),
                ))
                .execute(conn)?;
        }

        info!(incident_id, visit_id = record.visit_id, "Recorded incident");
        Ok(incident_id)
    })
}

}
