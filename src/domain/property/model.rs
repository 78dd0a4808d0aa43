//! Property domain entity

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::shared::errors::{DomainError, DomainResult};

/// Largest UTC offset accepted for a property's local time (±18h)
pub const MAX_UTC_OFFSET_MINUTES: i32 = 18 * 60;

/// Property status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyStatus {
    /// Open for new bookings
    Available,
    /// Temporarily closed
    Repairing,
    /// Soft-deleted
    Deleted,
}

impl PropertyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Repairing => "REPAIRING",
            Self::Deleted => "DELETED",
        }
    }
}

impl FromStr for PropertyStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(Self::Available),
            "REPAIRING" => Ok(Self::Repairing),
            "DELETED" => Ok(Self::Deleted),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A bookable property owned by an agent
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub id: i32,
    pub agent_id: i32,
    pub name: String,
    pub address: String,
    /// Listing category such as HOTEL or HOMESTAY
    pub property_type: String,
    pub description: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub status: PropertyStatus,
    /// Local time of the property, minutes east of UTC
    pub utc_offset_minutes: i32,
    pub created_at: DateTime<Utc>,
}

impl Property {
    pub fn is_bookable(&self) -> bool {
        self.status == PropertyStatus::Available
    }

    /// The property's local timezone as a fixed offset.
    ///
    /// Offsets are validated on write, so an out-of-range value only comes
    /// from a hand-edited row; it falls back to UTC.
    pub fn local_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }
}

/// Input for creating a property
#[derive(Debug, Clone)]
pub struct NewProperty {
    pub agent_id: i32,
    pub name: String,
    pub address: String,
    pub property_type: String,
    pub description: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub utc_offset_minutes: i32,
}

pub fn validate_utc_offset(minutes: i32) -> DomainResult<()> {
    if minutes.abs() > MAX_UTC_OFFSET_MINUTES {
        return Err(DomainError::Validation(format!(
            "utcOffsetMinutes must be within ±{}",
            MAX_UTC_OFFSET_MINUTES
        )));
    }
    Ok(())
}

/// Latitude within ±90 and longitude within ±180 degrees, when present.
pub fn validate_coordinates(longitude: Option<f64>, latitude: Option<f64>) -> DomainResult<()> {
    if let Some(lon) = longitude {
        if !(-180.0..=180.0).contains(&lon) {
            return Err(DomainError::Validation(format!(
                "longitude {} is outside ±180",
                lon
            )));
        }
    }
    if let Some(lat) = latitude {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(DomainError::Validation(format!(
                "latitude {} is outside ±90",
                lat
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_property(status: PropertyStatus, offset: i32) -> Property {
        Property {
            id: 1,
            agent_id: 10,
            name: "Riverside".into(),
            address: "1 River Rd".into(),
            property_type: "HOTEL".into(),
            description: None,
            longitude: None,
            latitude: None,
            status,
            utc_offset_minutes: offset,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn only_available_is_bookable() {
        assert!(sample_property(PropertyStatus::Available, 0).is_bookable());
        assert!(!sample_property(PropertyStatus::Repairing, 0).is_bookable());
        assert!(!sample_property(PropertyStatus::Deleted, 0).is_bookable());
    }

    #[test]
    fn status_parses_wire_names() {
        assert_eq!(
            "REPAIRING".parse::<PropertyStatus>().unwrap(),
            PropertyStatus::Repairing
        );
        assert!("repairing".parse::<PropertyStatus>().is_err());
    }

    #[test]
    fn local_offset_uses_minutes() {
        let p = sample_property(PropertyStatus::Available, 7 * 60);
        assert_eq!(p.local_offset().local_minus_utc(), 7 * 3600);
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        assert!(validate_utc_offset(19 * 60).is_err());
        assert!(validate_utc_offset(-(18 * 60)).is_ok());
    }

    #[test]
    fn coordinates_must_be_on_the_globe() {
        assert!(validate_coordinates(Some(106.7), Some(10.8)).is_ok());
        assert!(validate_coordinates(None, None).is_ok());
        assert!(validate_coordinates(Some(181.0), None).is_err());
        assert!(validate_coordinates(None, Some(-90.5)).is_err());
        assert!(validate_coordinates(Some(f64::NAN), None).is_err());
    }
}
