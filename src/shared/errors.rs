use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type for domain and application operations
pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Invalid status value: {0}")]
    InvalidStatus(String),

    #[error("Total price mismatch: declared {declared}, computed {computed}")]
    PriceMismatch { declared: f64, computed: f64 },

    #[error("Check-in is only allowed between {opens} and {closes}")]
    CheckInClosed {
        opens: DateTime<Utc>,
        closes: DateTime<Utc>,
    },

    #[error("Room {room_id} already booked within this time frame")]
    RoomConflict { room_id: i32 },

    #[error("{entity} {id} not available (status: {status})")]
    Unavailable {
        entity: &'static str,
        id: i32,
        status: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Corrupted record: {0}")]
    Corrupted(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }

    /// Short machine-readable label, used as a metrics dimension.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Validation(_) => "validation",
            Self::InvalidStatus(_) => "invalid_status",
            Self::PriceMismatch { .. } => "price_mismatch",
            Self::CheckInClosed { .. } => "check_in_closed",
            Self::RoomConflict { .. } => "conflict",
            Self::Unavailable { .. } => "unavailable",
            Self::Database(_) => "database",
            Self::Corrupted(_) => "corrupted",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_formats_entity_and_id() {
        let err = DomainError::not_found("Booking", 42);
        assert_eq!(err.to_string(), "Not found: Booking with id=42");
        assert_eq!(err.kind(), "not_found");
    }

    #[test]
    fn conflict_message_names_room() {
        let err = DomainError::RoomConflict { room_id: 7 };
        assert_eq!(
            err.to_string(),
            "Room 7 already booked within this time frame"
        );
    }
}
