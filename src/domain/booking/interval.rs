//! Half-open stay interval `[start, end)`

use chrono::{DateTime, Duration, Utc};

use crate::shared::errors::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl StayInterval {
    /// Requires `start < end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<Self> {
        if start >= end {
            return Err(DomainError::Validation(
                "startDate must be before endDate".into(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// `[a,b)` and `[c,d)` overlap iff `a < d && c < b`.
    pub fn overlaps(&self, other: &StayInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    fn interval(a: u32, b: u32) -> StayInterval {
        StayInterval::new(day(a), day(b)).unwrap()
    }

    #[test]
    fn rejects_empty_and_inverted_ranges() {
        assert!(StayInterval::new(day(3), day(3)).is_err());
        assert!(StayInterval::new(day(4), day(3)).is_err());
    }

    #[test]
    fn shared_day_overlaps() {
        assert!(interval(1, 5).overlaps(&interval(4, 6)));
        assert!(interval(4, 6).overlaps(&interval(1, 5)));
    }

    #[test]
    fn touching_ranges_do_not_overlap() {
        assert!(!interval(1, 3).overlaps(&interval(3, 5)));
        assert!(!interval(3, 5).overlaps(&interval(1, 3)));
    }

    #[test]
    fn containment_overlaps() {
        assert!(interval(1, 10).overlaps(&interval(3, 4)));
        assert!(interval(3, 4).overlaps(&interval(1, 10)));
    }
}
