// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for lifecycle status application and timestamp stamping.

use crate::{LifecycleTimestamps, apply_status};
use dock_visit_domain::VisitStatus;
use time::macros::datetime;

#[test]
fn test_arrival_stamps_only_arrived_at() {
    let now = datetime!(2024-06-01 10:20:00 UTC);
    let change = apply_status(&LifecycleTimestamps::default(), VisitStatus::Arrived, now);

    assert_eq!(change.status, VisitStatus::Arrived);
    assert_eq!(change.timestamps.arrived_at, Some(now));
    assert!(change.timestamps.unloading_started_at.is_none());
    assert!(change.timestamps.finished_at.is_none());
    assert!(change.timestamps.departed_at.is_none());
}

#[test]
fn test_pending_stamps_nothing() {
    let now = datetime!(2024-06-01 10:20:00 UTC);
    let change = apply_status(&LifecycleTimestamps::default(), VisitStatus::Pending, now);

    assert_eq!(change.status, VisitStatus::Pending);
    assert_eq!(change.timestamps, LifecycleTimestamps::default());
}

#[test]
fn test_later_status_keeps_earlier_stamps() {
    let arrived = datetime!(2024-06-01 10:20:00 UTC);
    let finished = datetime!(2024-06-01 11:05:00 UTC);

    let after_arrival =
        apply_status(&LifecycleTimestamps::default(), VisitStatus::Arrived, arrived);
    let after_finish = apply_status(&after_arrival.timestamps, VisitStatus::Finished, finished);

    assert_eq!(after_finish.status, VisitStatus::Finished);
    assert_eq!(after_finish.timestamps.arrived_at, Some(arrived));
    assert_eq!(after_finish.timestamps.finished_at, Some(finished));
    assert!(after_finish.timestamps.unloading_started_at.is_none());
}

#[test]
fn test_reapplying_a_status_does_not_overwrite_its_stamp() {
    let first = datetime!(2024-06-01 10:20:00 UTC);
    let second = datetime!(2024-06-01 10:45:00 UTC);

    let once = apply_status(&LifecycleTimestamps::default(), VisitStatus::Arrived, first);
    let twice = apply_status(&once.timestamps, VisitStatus::Arrived, second);

    assert_eq!(twice.timestamps.arrived_at, Some(first));
}

#[test]
fn test_statuses_may_be_applied_out_of_order() {
    // Operators can skip ahead (or back) freely; only the stamps are guarded.
    let now = datetime!(2024-06-01 12:00:00 UTC);
    let departed = apply_status(&LifecycleTimestamps::default(), VisitStatus::Departed, now);

    assert_eq!(departed.status, VisitStatus::Departed);
    assert_eq!(departed.timestamps.departed_at, Some(now));
    assert!(departed.timestamps.arrived_at.is_none());

    // Going back to Arrived afterwards still stamps arrival
    let later = datetime!(2024-06-01 12:10:00 UTC);
    let corrected = apply_status(&departed.timestamps, VisitStatus::Arrived, later);
    assert_eq!(corrected.status, VisitStatus::Arrived);
    assert_eq!(corrected.timestamps.arrived_at, Some(later));
    assert_eq!(corrected.timestamps.departed_at, Some(now));
}

#[test]
fn test_full_progression_stamps_each_once() {
    let times = [
        datetime!(2024-06-01 10:20:00 UTC),
        datetime!(2024-06-01 10:40:00 UTC),
        datetime!(2024-06-01 11:30:00 UTC),
        datetime!(2024-06-01 11:45:00 UTC),
    ];
    let statuses = [
        VisitStatus::Arrived,
        VisitStatus::Unloading,
        VisitStatus::Finished,
        VisitStatus::Departed,
    ];

    let mut timestamps = LifecycleTimestamps::default();
    for (status, now) in statuses.into_iter().zip(times) {
        timestamps = apply_status(&timestamps, status, now).timestamps;
    }

    assert_eq!(timestamps.arrived_at, Some(times[0]));
    assert_eq!(timestamps.unloading_started_at, Some(times[1]));
    assert_eq!(timestamps.finished_at, Some(times[2]));
    assert_eq!(timestamps.departed_at, Some(times[3]));
}
