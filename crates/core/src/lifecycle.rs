// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lifecycle status application and timestamp stamping.
//!
//! Operators may set any of the five statuses at any time (a mis-click is
//! corrected by setting the right status again), so ordering is not
//! enforced. Timestamps are different: each lifecycle timestamp records the
//! first time its status was reached and is never overwritten afterwards.

use dock_visit_domain::VisitStatus;
use time::OffsetDateTime;

/// The four lifecycle event timestamps of a visit.
///
/// Each is `None` until its status is first reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LifecycleTimestamps {
    /// When the vehicle first arrived.
    pub arrived_at: Option<OffsetDateTime>,
    /// When unloading first started.
    pub unloading_started_at: Option<OffsetDateTime>,
    /// When unloading first finished.
    pub finished_at: Option<OffsetDateTime>,
    /// When the vehicle first departed.
    pub departed_at: Option<OffsetDateTime>,
}

/// The result of applying a status to a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    /// The new status.
    pub status: VisitStatus,
    /// The lifecycle timestamps after stamping.
    pub timestamps: LifecycleTimestamps,
}

/// Applies a target status and stamps its associated timestamp.
///
/// The timestamp matching the target is set to `now` only if it is still
/// unset; re-applying a status never overwrites the first-reached time.
/// `Pending` has no associated timestamp.
#[must_use]
pub fn apply_status(
    current: &LifecycleTimestamps,
    target: VisitStatus,
    now: OffsetDateTime,
) -> StatusChange {
    let mut timestamps = *current;
    match target {
        VisitStatus::Pending => {}
        VisitStatus::Arrived => stamp_once(&mut timestamps.arrived_at, now),
        VisitStatus::Unloading => stamp_once(&mut timestamps.unloading_started_at, now),
        VisitStatus::Finished => stamp_once(&mut timestamps.finished_at, now),
        VisitStatus::Departed => stamp_once(&mut timestamps.departed_at, now),
    }
    StatusChange {
        status: target,
        timestamps,
    }
}

/// Sets the slot to `now` only if it has never been set.
fn stamp_once(slot: &mut Option<OffsetDateTime>, now: OffsetDateTime) {
    if slot.is_none() {
        *slot = Some(now);
    }
}
