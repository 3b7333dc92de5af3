// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Incident log query operations.
//!
//! Incident reads join the visit, its parties, and the reporting operator,
//! and batch-load attachment descriptors to avoid per-incident round trips.

use std::collections::HashMap;

use crate::data_models::{
    AttachmentData, CarrierRow, IncidentAttachmentRow, IncidentData, IncidentRow, OperatorRow,
    TenantRow, VisitRow,
};
use crate::diesel_schema::{carriers, incident_attachments, incidents, operators, tenants, visits};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

/// Joined row shape shared by the incident queries.
type IncidentJoinRow = (
    IncidentRow,
    VisitRow,
    TenantRow,
    Option<CarrierRow>,
    OperatorRow,
);

/// Assembles `IncidentData` from joined rows and their attachments.
fn assemble(
    rows: Vec<IncidentJoinRow>,
    mut attachments_by_incident: HashMap<i64, Vec<AttachmentData>>,
) -> Vec<IncidentData> {
    rows.into_iter()
        .map(|(incident, visit, tenant, carrier, reporter)| IncidentData {
            incident_id: incident.incident_id,
            visit_id: incident.visit_id,
            visit_scheduled_at: visit.scheduled_at,
            visit_status: visit.status,
            tenant_name: tenant.trade_name,
            carrier_name: carrier.map(|c| c.name),
            reporter_name: reporter.display_name,
            occurred_at: incident.occurred_at,
            what: incident.what,
            why: incident.why,
            location: incident.location,
            who: incident.who,
            how: incident.how,
            how_much: incident.how_much,
            attachments: attachments_by_incident
                .remove(&incident.incident_id)
                .unwrap_or_default(),
        })
        .collect()
}

backend_fn! {

/// Lists all incidents, newest first, with joined visit and party data.
pub fn list_incidents(conn: &mut _) -> Result<Vec<IncidentData>, PersistenceError> {
    let rows: Vec<IncidentJoinRow> = incidents::table
        .inner_join(
            visits::table
                .inner_join(tenants::table)
                .left_join(carriers::table),
        )
        .inner_join(operators::table)
        .order(incidents::occurred_at.desc())
        .select((
            IncidentRow::as_select(),
            VisitRow::as_select(),
            TenantRow::as_select(),
            Option::<CarrierRow>::as_select(),
            OperatorRow::as_select(),
        ))
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_incidents: {e}")))?;

    let incident_ids: Vec<i64> = rows.iter().map(|(i, ..)| i.incident_id).collect();
    let attachment_rows: Vec<IncidentAttachmentRow> = incident_attachments::table
        .filter(incident_attachments::incident_id.eq_any(&incident_ids))
        .order(incident_attachments::attachment_id.asc())
        .select(IncidentAttachmentRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_incidents attachments: {e}")))?;

    let mut attachments_by_incident: HashMap<i64, Vec<AttachmentData>> = HashMap::new();
    for row in attachment_rows {
        attachments_by_incident
            .entry(row.incident_id)
            .or_default()
            .push(row.into());
    }

    Ok(assemble(rows, attachments_by_incident))
}

}

backend_fn! {

/// Retrieves a single incident with joined visit and party data.
pub fn get_incident(
    conn: &mut _,
    incident_id: i64,
) -> Result<Option<IncidentData>, PersistenceError> {
    let row: Option<IncidentJoinRow> = incidents::table
        .inner_join(
            visits::table
                .inner_join(tenants::table)
                .left_join(carriers::table),
        )
        .inner_join(operators::table)
        .filter(incidents::incident_id.eq(incident_id))
        .select((
            IncidentRow::as_select(),
            VisitRow::as_select(),
            TenantRow::as_select(),
            Option::<CarrierRow>::as_select(),
            OperatorRow::as_select(),
        ))
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_incident: {e}")))?;

    let Some(row) = row else {
        return Ok(None);
    };

    let attachment_rows: Vec<IncidentAttachmentRow> = incident_attachments::table
        .filter(incident_attachments::incident_id.eq(incident_id))
        .order(incident_attachments::attachment_id.asc())
        .select(IncidentAttachmentRow::as_select())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("get_incident attachments: {e}")))?;

    let mut attachments_by_incident: HashMap<i64, Vec<AttachmentData>> = HashMap::new();
    attachments_by_incident.insert(
        incident_id,
        attachment_rows.into_iter().map(Into::into).collect(),
    );

    Ok(assemble(vec![row], attachments_by_incident).pop())
}

}
