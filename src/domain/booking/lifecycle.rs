//! Booking status transitions
//!
//! Any status in the allow-set may be applied manually, including the one
//! the booking already has. Only CHECKIN is gated: it must happen between
//! 12:00 on the local start date and 03:00 the following day.

use chrono::{DateTime, Duration, FixedOffset, NaiveTime, TimeZone, Utc};

use super::model::{Booking, BookingStatus};
use crate::shared::errors::{DomainError, DomainResult};

const CHECK_IN_OPENS_AT_HOUR: i64 = 12;
const CHECK_IN_WINDOW_HOURS: i64 = 15;

/// Half-open interval `[opens, closes)` in which check-in is accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckInWindow {
    pub opens: DateTime<Utc>,
    pub closes: DateTime<Utc>,
}

impl CheckInWindow {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.opens <= instant && instant < self.closes
    }
}

/// Check-in window for a stay starting at `start_date`, where `offset` is
/// the property's local time.
pub fn check_in_window(start_date: DateTime<Utc>, offset: FixedOffset) -> CheckInWindow {
    let local_midnight = start_date
        .with_timezone(&offset)
        .date_naive()
        .and_time(NaiveTime::MIN);
    let opens_local = local_midnight + Duration::hours(CHECK_IN_OPENS_AT_HOUR);
    let opens_utc = opens_local - Duration::seconds(i64::from(offset.local_minus_utc()));
    let opens = Utc.from_utc_datetime(&opens_utc);

    CheckInWindow {
        opens,
        closes: opens + Duration::hours(CHECK_IN_WINDOW_HOURS),
    }
}

/// Apply a manual status change to `booking`.
pub fn apply_status(
    booking: &mut Booking,
    target: BookingStatus,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> DomainResult<()> {
    if target == BookingStatus::CheckIn {
        let window = check_in_window(booking.start_date, offset);
        if !window.contains(now) {
            return Err(DomainError::CheckInClosed {
                opens: window.opens,
                closes: window.closes,
            });
        }
    }

    booking.status = target;
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn at(d: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, h, m, 0).unwrap()
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn sample_booking(status: BookingStatus) -> Booking {
        Booking {
            id: 1,
            user_id: 5,
            property_id: 2,
            room_ids: vec![3],
            start_date: at(1, 0, 0),
            end_date: at(3, 0, 0),
            status,
            total_price: 200.0,
            deposit: None,
            created_at: at(1, 0, 0),
        }
    }

    #[test]
    fn window_runs_noon_to_three_am() {
        let window = check_in_window(at(1, 0, 0), utc());
        assert_eq!(window.opens, at(1, 12, 0));
        assert_eq!(window.closes, at(2, 3, 0));
    }

    #[test]
    fn window_bounds_are_half_open() {
        let window = check_in_window(at(1, 0, 0), utc());
        assert!(!window.contains(at(1, 11, 59)));
        assert!(window.contains(at(1, 12, 0)));
        assert!(window.contains(at(2, 2, 59)));
        assert!(!window.contains(at(2, 3, 0)));
    }

    #[test]
    fn window_anchors_on_local_start_date() {
        // 2024-01-01T20:00Z is already Jan 2nd in UTC+7
        let offset = FixedOffset::east_opt(7 * 3600).unwrap();
        let window = check_in_window(at(1, 20, 0), offset);
        // noon local on Jan 2nd = 05:00Z
        assert_eq!(window.opens, at(2, 5, 0));
        assert_eq!(window.closes, at(2, 20, 0));
    }

    #[test]
    fn check_in_before_noon_is_rejected() {
        let mut booking = sample_booking(BookingStatus::Confirmed);
        let err = apply_status(&mut booking, BookingStatus::CheckIn, at(1, 9, 0), utc())
            .unwrap_err();
        assert!(matches!(err, DomainError::CheckInClosed { .. }));
        assert_eq!(booking.status, BookingStatus::Confirmed);
    }

    #[test]
    fn check_in_at_one_pm_is_accepted() {
        let mut booking = sample_booking(BookingStatus::Confirmed);
        apply_status(&mut booking, BookingStatus::CheckIn, at(1, 13, 0), utc()).unwrap();
        assert_eq!(booking.status, BookingStatus::CheckIn);
    }

    #[test]
    fn check_in_two_days_later_is_rejected() {
        let mut booking = sample_booking(BookingStatus::Confirmed);
        assert!(
            apply_status(&mut booking, BookingStatus::CheckIn, at(3, 4, 0), utc()).is_err()
        );
    }

    #[test]
    fn other_transitions_ignore_the_clock() {
        let mut booking = sample_booking(BookingStatus::Pending);
        apply_status(&mut booking, BookingStatus::Canceled, at(20, 0, 0), utc()).unwrap();
        assert_eq!(booking.status, BookingStatus::Canceled);
        apply_status(&mut booking, BookingStatus::CheckOut, at(1, 1, 0), utc()).unwrap();
        assert_eq!(booking.status, BookingStatus::CheckOut);
    }

    #[test]
    fn reapplying_same_status_is_accepted() {
        let mut booking = sample_booking(BookingStatus::Confirmed);
        apply_status(&mut booking, BookingStatus::Confirmed, at(1, 0, 0), utc()).unwrap();
        apply_status(&mut booking, BookingStatus::Confirmed, at(1, 0, 0), utc()).unwrap();
        assert_eq!(booking.status, BookingStatus::Confirmed);
    }
}
