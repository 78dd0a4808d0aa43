//! Property DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::{PropertyRequest, PropertyWithRooms};
use crate::domain::Property;
use crate::interfaces::http::modules::amenities::{amenity_dtos, AmenityDto};
use crate::interfaces::http::modules::rooms::RoomWithAmenitiesDto;

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyRequest {
    #[validate(range(min = 1))]
    pub agent_id: i32,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub address: String,
    /// Listing category such as HOTEL or HOMESTAY
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 50))]
    pub property_type: String,
    pub description: Option<String>,
    /// Degrees, within ±180
    pub longitude: Option<f64>,
    /// Degrees, within ±90
    pub latitude: Option<f64>,
    /// Local time, minutes east of UTC (within ±1080); server default when omitted
    pub utc_offset_minutes: Option<i32>,
    #[serde(default)]
    pub amenity_ids: Vec<i32>,
}

impl From<CreatePropertyRequest> for PropertyRequest {
    fn from(r: CreatePropertyRequest) -> Self {
        Self {
            agent_id: r.agent_id,
            name: r.name,
            address: r.address,
            property_type: r.property_type,
            description: r.description,
            longitude: r.longitude,
            latitude: r.latitude,
            utc_offset_minutes: r.utc_offset_minutes,
            amenity_ids: r.amenity_ids,
        }
    }
}

/// Status change for a property or room
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    #[validate(length(min = 1))]
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDto {
    pub id: i32,
    pub agent_id: i32,
    pub name: String,
    pub address: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub description: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    /// AVAILABLE, REPAIRING or DELETED
    pub status: String,
    pub utc_offset_minutes: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Property> for PropertyDto {
    fn from(p: Property) -> Self {
        Self {
            id: p.id,
            agent_id: p.agent_id,
            name: p.name,
            address: p.address,
            property_type: p.property_type,
            description: p.description,
            longitude: p.longitude,
            latitude: p.latitude,
            status: p.status.as_str().to_string(),
            utc_offset_minutes: p.utc_offset_minutes,
            created_at: p.created_at,
        }
    }
}

/// Property fields embedded in booking responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertySummaryDto {
    pub id: i32,
    pub agent_id: i32,
    pub name: String,
    pub address: String,
}

impl From<Property> for PropertySummaryDto {
    fn from(p: Property) -> Self {
        Self {
            id: p.id,
            agent_id: p.agent_id,
            name: p.name,
            address: p.address,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyWithRoomsDto {
    pub property: PropertyDto,
    pub amenities: Vec<AmenityDto>,
    pub rooms: Vec<RoomWithAmenitiesDto>,
}

impl From<PropertyWithRooms> for PropertyWithRoomsDto {
    fn from(p: PropertyWithRooms) -> Self {
        Self {
            property: PropertyDto::from(p.property),
            amenities: amenity_dtos(p.amenities),
            rooms: p.rooms.into_iter().map(RoomWithAmenitiesDto::from).collect(),
        }
    }
}
