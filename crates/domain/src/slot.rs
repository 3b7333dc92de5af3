// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hourly capacity windows for visit admission.
//!
//! Admission is bounded per clock hour: every visit falls into the
//! half-open window `[HH:00:00, HH+1:00:00)` of its scheduled time, and a
//! window may hold at most [`HOURLY_VISIT_CAPACITY`] visits.

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime, Time, UtcOffset};

/// Maximum number of visits that may share one clock-hour window.
pub const HOURLY_VISIT_CAPACITY: i64 = 8;

/// A half-open one-hour capacity window `[start, end)`.
///
/// Both bounds are UTC; the window is derived purely from the wall clock
/// hour of the scheduled time, so `14:02` and `14:37` share a window while
/// `14:59:59` and `15:00:00` do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotWindow {
    /// Inclusive lower bound.
    start: OffsetDateTime,
    /// Exclusive upper bound (exactly one hour after `start`).
    end: OffsetDateTime,
}

impl SlotWindow {
    /// Computes the window enclosing the given scheduled time.
    ///
    /// The input is normalized to UTC before the hour floor so that the
    /// same instant always maps to the same window regardless of the
    /// offset it was supplied in.
    #[must_use]
    pub fn enclosing(scheduled_at: OffsetDateTime) -> Self {
        let utc = scheduled_at.to_offset(UtcOffset::UTC);
        let start =
            utc.replace_time(Time::MIDNIGHT) + Duration::hours(i64::from(utc.time().hour()));
        Self {
            start,
            end: start + Duration::HOUR,
        }
    }

    /// Returns the inclusive lower bound.
    #[must_use]
    pub const fn start(&self) -> OffsetDateTime {
        self.start
    }

    /// Returns the exclusive upper bound.
    #[must_use]
    pub const fn end(&self) -> OffsetDateTime {
        self.end
    }

    /// Returns true if the given instant falls inside the window.
    #[must_use]
    pub fn contains(&self, instant: OffsetDateTime) -> bool {
        instant >= self.start && instant < self.end
    }

    /// Returns true if a window holding `existing` visits can admit one more.
    #[must_use]
    pub const fn has_capacity(existing: i64) -> bool {
        existing < HOURLY_VISIT_CAPACITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_window_floors_to_the_hour() {
        let window = SlotWindow::enclosing(datetime!(2024-06-01 14:37:21 UTC));
        assert_eq!(window.start(), datetime!(2024-06-01 14:00:00 UTC));
        assert_eq!(window.end(), datetime!(2024-06-01 15:00:00 UTC));
    }

    #[test]
    fn test_same_hour_shares_a_window() {
        let a = SlotWindow::enclosing(datetime!(2024-06-01 14:00:00 UTC));
        let b = SlotWindow::enclosing(datetime!(2024-06-01 14:59:59 UTC));
        assert_eq!(a, b);
    }

    #[test]
    fn test_next_hour_is_a_different_window() {
        let a = SlotWindow::enclosing(datetime!(2024-06-01 14:59:59 UTC));
        let b = SlotWindow::enclosing(datetime!(2024-06-01 15:00:00 UTC));
        assert_ne!(a, b);
        assert_eq!(a.end(), b.start());
    }

    #[test]
    fn test_window_is_half_open() {
        let window = SlotWindow::enclosing(datetime!(2024-06-01 09:30:00 UTC));
        assert!(window.contains(datetime!(2024-06-01 09:00:00 UTC)));
        assert!(window.contains(datetime!(2024-06-01 09:59:59 UTC)));
        assert!(!window.contains(datetime!(2024-06-01 10:00:00 UTC)));
    }

    #[test]
    fn test_offset_times_normalize_to_utc() {
        // 09:30 at -05:00 is 14:30 UTC
        let window = SlotWindow::enclosing(datetime!(2024-06-01 09:30:00 -5));
        assert_eq!(window.start(), datetime!(2024-06-01 14:00:00 UTC));
    }

    #[test]
    fn test_capacity_boundary() {
        assert!(SlotWindow::has_capacity(0));
        assert!(SlotWindow::has_capacity(HOURLY_VISIT_CAPACITY - 1));
        assert!(!SlotWindow::has_capacity(HOURLY_VISIT_CAPACITY));
        assert!(!SlotWindow::has_capacity(HOURLY_VISIT_CAPACITY + 1));
    }
}
