// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV export of visit records.
//!
//! Produces the operator-facing visit log for a date range: one row per
//! visit with its parties, vehicle, status, and lifecycle timestamps.

use dock_visit_persistence::Persistence;

use crate::error::ApiError;
use crate::handlers::list_visits;
use crate::request_response::ListVisitsRequest;

/// Column headers of the visit export.
const EXPORT_HEADERS: &[&str] = &[
    "visit_id",
    "scheduled_at",
    "tenant",
    "carrier",
    "plate",
    "driver_name",
    "status",
    "requires_confirmation",
    "arrived_at",
    "unloading_started_at",
    "finished_at",
    "departed_at",
];

/// Exports the visits in an inclusive range as CSV text.
///
/// # Errors
///
/// Returns `InvalidInput` for unparseable bounds or an internal error if
/// the store or the CSV writer fails.
pub fn export_visits_csv(
    persistence: &mut Persistence,
    from: Option<String>,
    to: Option<String>,
) -> Result<String, ApiError> {
    let visits = list_visits(persistence, &ListVisitsRequest { from, to })?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(EXPORT_HEADERS)
        .map_err(|e| csv_error(&e))?;

    for visit in visits {
        writer
            .write_record([
                visit.visit_id.to_string(),
                visit.scheduled_at,
                visit.tenant.trade_name,
                visit.carrier.map(|c| c.name).unwrap_or_default(),
                visit.plate.unwrap_or_default(),
                visit.driver_name.unwrap_or_default(),
                visit.status,
                visit.requires_confirmation.to_string(),
                visit.arrived_at.unwrap_or_default(),
                visit.unloading_started_at.unwrap_or_default(),
                visit.finished_at.unwrap_or_default(),
                visit.departed_at.unwrap_or_default(),
            ])
            .map_err(|e| csv_error(&e))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to flush CSV writer: {e}"),
        })?;
    String::from_utf8(bytes).map_err(|e| ApiError::Internal {
        message: format!("CSV output was not valid UTF-8: {e}"),
    })
}

fn csv_error(err: &csv::Error) -> ApiError {
    ApiError::Internal {
        message: format!("Failed to write CSV: {err}"),
    }
}
