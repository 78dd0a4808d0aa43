//! Amenity DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Amenity;

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateAmenityRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Grouping such as GENERAL or BATHROOM
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 50))]
    pub kind: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AmenityDto {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<Amenity> for AmenityDto {
    fn from(a: Amenity) -> Self {
        Self {
            id: a.id,
            name: a.name,
            kind: a.kind,
        }
    }
}

pub(crate) fn amenity_dtos(amenities: Vec<Amenity>) -> Vec<AmenityDto> {
    amenities.into_iter().map(AmenityDto::from).collect()
}
