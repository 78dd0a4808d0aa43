//! Nightly pricing
//!
//! A night is 24 hours of stay, measured in fractional hours: a 36 hour
//! stay is charged 1.5 nights.

use super::interval::StayInterval;

const SECONDS_PER_NIGHT: f64 = 24.0 * 3600.0;

/// Number of (possibly fractional) nights covered by the interval
pub fn nights(interval: &StayInterval) -> f64 {
    interval.duration().num_seconds() as f64 / SECONDS_PER_NIGHT
}

/// Price of one room for the interval
pub fn room_total(nightly_price: i64, interval: &StayInterval) -> f64 {
    nightly_price as f64 * nights(interval)
}

/// Sum of `price * nights` over all rooms, accumulated in the given order.
pub fn compute_total<I>(nightly_prices: I, interval: &StayInterval) -> f64
where
    I: IntoIterator<Item = i64>,
{
    nightly_prices
        .into_iter()
        .fold(0.0, |acc, price| acc + room_total(price, interval))
}

/// Exact comparison of a client-declared total with the computed one.
pub fn matches_declared(declared: f64, computed: f64) -> bool {
    declared == computed
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn stay(start_hour: u32, hours: i64) -> StayInterval {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, start_hour, 0, 0).unwrap();
        StayInterval::new(start, start + chrono::Duration::hours(hours)).unwrap()
    }

    #[test]
    fn two_nights_at_100() {
        let interval = stay(0, 48);
        assert_eq!(nights(&interval), 2.0);
        assert_eq!(compute_total([100], &interval), 200.0);
    }

    #[test]
    fn partial_days_are_charged_fractionally() {
        let interval = stay(12, 36);
        assert_eq!(nights(&interval), 1.5);
        assert_eq!(compute_total([100], &interval), 150.0);
    }

    #[test]
    fn multiple_rooms_are_summed() {
        let interval = stay(0, 72);
        assert_eq!(compute_total([100, 250, 0], &interval), 1050.0);
    }

    #[test]
    fn total_is_deterministic() {
        let interval = stay(6, 30);
        let a = compute_total([99, 101, 37], &interval);
        let b = compute_total([99, 101, 37], &interval);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn declared_total_must_match_exactly() {
        assert!(matches_declared(200.0, 200.0));
        assert!(!matches_declared(150.0, 200.0));
        assert!(!matches_declared(199.999_999, 200.0));
    }
}
