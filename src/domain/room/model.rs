//! Room domain entity

use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::shared::errors::DomainError;

/// Room status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomStatus {
    Available,
    NotAvailable,
    Deleted,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::NotAvailable => "NOTAVAILABLE",
            Self::Deleted => "DELETED",
        }
    }
}

impl FromStr for RoomStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(Self::Available),
            "NOTAVAILABLE" => Ok(Self::NotAvailable),
            "DELETED" => Ok(Self::Deleted),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A room inside a property
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: i32,
    pub property_id: i32,
    pub name: String,
    /// Nightly price in whole currency units
    pub price: i64,
    pub status: RoomStatus,
    pub created_at: DateTime<Utc>,
}

impl Room {
    pub fn is_bookable(&self) -> bool {
        self.status == RoomStatus::Available
    }
}

/// Input for creating a room
#[derive(Debug, Clone)]
pub struct NewRoom {
    pub property_id: i32,
    pub name: String,
    pub price: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_wire_name() {
        for status in [RoomStatus::Available, RoomStatus::NotAvailable, RoomStatus::Deleted] {
            assert_eq!(status.as_str().parse::<RoomStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_invalid() {
        let err = "BROKEN".parse::<RoomStatus>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidStatus(s) if s == "BROKEN"));
    }
}
