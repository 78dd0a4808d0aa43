//! Room DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::{RoomRequest, RoomWithAmenities};
use crate::domain::Room;
use crate::interfaces::http::modules::amenities::{amenity_dtos, AmenityDto};

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[validate(range(min = 1))]
    pub property_id: i32,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Nightly price in whole currency units
    #[validate(range(min = 0))]
    pub price: i64,
    #[serde(default)]
    pub amenity_ids: Vec<i32>,
}

impl From<CreateRoomRequest> for RoomRequest {
    fn from(r: CreateRoomRequest) -> Self {
        Self {
            property_id: r.property_id,
            name: r.name,
            price: r.price,
            amenity_ids: r.amenity_ids,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomDto {
    pub id: i32,
    pub property_id: i32,
    pub name: String,
    pub price: i64,
    /// AVAILABLE, NOTAVAILABLE or DELETED
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Room> for RoomDto {
    fn from(r: Room) -> Self {
        Self {
            id: r.id,
            property_id: r.property_id,
            name: r.name,
            price: r.price,
            status: r.status.as_str().to_string(),
            created_at: r.created_at,
        }
    }
}

/// Room listing entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomWithAmenitiesDto {
    pub room: RoomDto,
    pub amenities: Vec<AmenityDto>,
}

impl From<RoomWithAmenities> for RoomWithAmenitiesDto {
    fn from(r: RoomWithAmenities) -> Self {
        Self {
            room: RoomDto::from(r.room),
            amenities: amenity_dtos(r.amenities),
        }
    }
}
