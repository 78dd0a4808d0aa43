//! Booking domain entity

use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::domain::property::Property;
use crate::domain::room::Room;
use crate::shared::errors::{DomainError, DomainResult};

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    /// Created with a deposit awaiting confirmation
    Pending,
    /// Created without a deposit, or confirmed by the agent
    Confirmed,
    /// Guest has arrived
    CheckIn,
    /// Guest has left
    CheckOut,
    /// Cancelled by guest or agent
    Canceled,
}

impl BookingStatus {
    /// Statuses that hold a room against overlapping stays
    pub const OCCUPYING: [BookingStatus; 3] = [Self::Pending, Self::Confirmed, Self::CheckIn];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::CheckIn => "CHECKIN",
            Self::CheckOut => "CHECKOUT",
            Self::Canceled => "CANCELED",
        }
    }

    pub fn is_occupying(&self) -> bool {
        Self::OCCUPYING.contains(self)
    }

    /// Status a new booking starts in: PENDING while a deposit is on the
    /// table, CONFIRMED otherwise.
    pub fn initial(deposit: Option<&NewDeposit>) -> Self {
        match deposit {
            Some(_) => Self::Pending,
            None => Self::Confirmed,
        }
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "CHECKIN" => Ok(Self::CheckIn),
            "CHECKOUT" => Ok(Self::CheckOut),
            "CANCELED" => Ok(Self::Canceled),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Deposit recorded against a booking
#[derive(Debug, Clone, PartialEq)]
pub struct Deposit {
    pub id: i32,
    pub booking_id: i32,
    pub amount: f64,
    /// Reference to the uploaded proof of payment, if any
    pub proof_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Deposit accompanying a booking request
#[derive(Debug, Clone, PartialEq)]
pub struct NewDeposit {
    pub amount: f64,
    pub proof_url: Option<String>,
}

impl NewDeposit {
    pub fn validate(&self) -> DomainResult<()> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(DomainError::Validation(
                "deposit amount must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}

/// A stay covering one or more rooms of a single property
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: i32,
    pub user_id: i32,
    pub property_id: i32,
    /// Rooms covered by this stay, ascending by id
    pub room_ids: Vec<i32>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: BookingStatus,
    pub total_price: f64,
    pub deposit: Option<Deposit>,
    pub created_at: DateTime<Utc>,
}

/// A booking together with the rooms and property it refers to
#[derive(Debug, Clone)]
pub struct BookingDetails {
    pub booking: Booking,
    pub rooms: Vec<Room>,
    pub property: Property,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupying_set_excludes_terminal_states() {
        assert!(BookingStatus::Pending.is_occupying());
        assert!(BookingStatus::Confirmed.is_occupying());
        assert!(BookingStatus::CheckIn.is_occupying());
        assert!(!BookingStatus::CheckOut.is_occupying());
        assert!(!BookingStatus::Canceled.is_occupying());
    }

    #[test]
    fn initial_status_depends_on_deposit_presence() {
        assert_eq!(BookingStatus::initial(None), BookingStatus::Confirmed);

        let deposit = NewDeposit {
            amount: 50.0,
            proof_url: None,
        };
        assert_eq!(
            BookingStatus::initial(Some(&deposit)),
            BookingStatus::Pending
        );
    }

    #[test]
    fn zero_deposit_still_counts_as_present() {
        let deposit = NewDeposit {
            amount: 0.0,
            proof_url: None,
        };
        assert_eq!(
            BookingStatus::initial(Some(&deposit)),
            BookingStatus::Pending
        );
    }

    #[test]
    fn status_parse_rejects_unknown_values() {
        assert_eq!(
            "CHECKIN".parse::<BookingStatus>().unwrap(),
            BookingStatus::CheckIn
        );
        let err = "FOO".parse::<BookingStatus>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidStatus(s) if s == "FOO"));
    }

    #[test]
    fn negative_or_nan_deposit_is_invalid() {
        let negative = NewDeposit {
            amount: -1.0,
            proof_url: None,
        };
        assert!(negative.validate().is_err());

        let nan = NewDeposit {
            amount: f64::NAN,
            proof_url: None,
        };
        assert!(nan.validate().is_err());
    }
}
