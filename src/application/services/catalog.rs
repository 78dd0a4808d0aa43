//! Catalog service: property, room and amenity data entry
//!
//! Nothing is physically deleted; deletion sets status DELETED (or the
//! amenity's deleted flag), which also hides the record from listings.

use std::collections::HashMap;

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use tracing::info;

use super::finish;
use crate::domain::amenity::dedup_ids;
use crate::domain::property::{validate_coordinates, validate_utc_offset};
use crate::domain::{
    Amenity, DomainError, DomainResult, NewAmenity, NewProperty, NewRoom, Property,
    PropertyStatus, Room, RoomStatus,
};
use crate::infrastructure::database::repositories::RepositoryContext;
use crate::shared::clock::SharedClock;

#[derive(Debug, Clone)]
pub struct PropertyRequest {
    pub agent_id: i32,
    pub name: String,
    pub address: String,
    pub property_type: String,
    pub description: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    /// Server default when absent
    pub utc_offset_minutes: Option<i32>,
    pub amenity_ids: Vec<i32>,
}

#[derive(Debug, Clone)]
pub struct RoomRequest {
    pub property_id: i32,
    pub name: String,
    pub price: i64,
    pub amenity_ids: Vec<i32>,
}

/// A room with its non-deleted amenities
#[derive(Debug, Clone, PartialEq)]
pub struct RoomWithAmenities {
    pub room: Room,
    pub amenities: Vec<Amenity>,
}

/// A property with its non-deleted amenities and rooms
#[derive(Debug, Clone)]
pub struct PropertyWithRooms {
    pub property: Property,
    pub amenities: Vec<Amenity>,
    pub rooms: Vec<RoomWithAmenities>,
}

pub struct CatalogService {
    db: DatabaseConnection,
    clock: SharedClock,
    default_utc_offset_minutes: i32,
}

impl CatalogService {
    pub fn new(db: DatabaseConnection, clock: SharedClock, default_utc_offset_minutes: i32) -> Self {
        Self {
            db,
            clock,
            default_utc_offset_minutes,
        }
    }

    fn repos(&self) -> RepositoryContext<'_, DatabaseConnection> {
        RepositoryContext::new(&self.db)
    }

    /// Insert a property and its amenity links on one transaction.
    ///
    /// Duplicate amenity ids collapse; an unknown or deleted amenity is not
    /// found and nothing is written.
    pub async fn create_property(&self, request: PropertyRequest) -> DomainResult<Property> {
        let utc_offset_minutes = request
            .utc_offset_minutes
            .unwrap_or(self.default_utc_offset_minutes);
        validate_utc_offset(utc_offset_minutes)?;
        validate_coordinates(request.longitude, request.latitude)?;
        require_non_blank("name", &request.name)?;
        require_non_blank("type", &request.property_type)?;
        let amenity_ids = dedup_ids(&request.amenity_ids);

        let txn = self.db.begin().await?;
        let result = self
            .create_property_in(&txn, request, utc_offset_minutes, &amenity_ids)
            .await;
        let property = finish(txn, result).await?;

        info!(
            property_id = property.id,
            agent_id = property.agent_id,
            amenities = amenity_ids.len(),
            "Property created"
        );
        Ok(property)
    }

    async fn create_property_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        request: PropertyRequest,
        utc_offset_minutes: i32,
        amenity_ids: &[i32],
    ) -> DomainResult<Property> {
        let repos = RepositoryContext::new(conn);
        require_amenities(&repos, amenity_ids).await?;
        let property = repos
            .properties()
            .insert(
                NewProperty {
                    agent_id: request.agent_id,
                    name: request.name,
                    address: request.address,
                    property_type: request.property_type,
                    description: request.description,
                    longitude: request.longitude,
                    latitude: request.latitude,
                    utc_offset_minutes,
                },
                self.clock.now(),
            )
            .await?;
        repos.amenities().link_property(property.id, amenity_ids).await?;
        Ok(property)
    }

    pub async fn set_property_status(&self, id: i32, status: &str) -> DomainResult<Property> {
        let status = status.parse::<PropertyStatus>()?;
        let property = self.repos().properties().set_status(id, status).await?;
        info!(property_id = id, status = %status, "Property status updated");
        Ok(property)
    }

    pub async fn delete_property(&self, id: i32) -> DomainResult<Property> {
        let property = self
            .repos()
            .properties()
            .set_status(id, PropertyStatus::Deleted)
            .await?;
        info!(property_id = id, "Property deleted");
        Ok(property)
    }

    /// Non-deleted properties of an agent, each with its non-deleted rooms,
    /// and amenities on both levels.
    pub async fn properties_for_agent(&self, agent_id: i32) -> DomainResult<Vec<PropertyWithRooms>> {
        let repos = self.repos();
        let properties = repos.properties().find_by_agent(agent_id).await?;
        let ids: Vec<i32> = properties.iter().map(|p| p.id).collect();
        let mut property_amenities = repos.amenities().for_properties(&ids).await?;

        let rooms = repos.rooms().find_by_properties(&ids).await?;
        let mut rooms_by_property: HashMap<i32, Vec<RoomWithAmenities>> = HashMap::new();
        for room in with_amenities(&repos, rooms).await? {
            rooms_by_property
                .entry(room.room.property_id)
                .or_default()
                .push(room);
        }

        Ok(properties
            .into_iter()
            .map(|property| PropertyWithRooms {
                amenities: property_amenities.remove(&property.id).unwrap_or_default(),
                rooms: rooms_by_property.remove(&property.id).unwrap_or_default(),
                property,
            })
            .collect())
    }

    /// Insert a room and its amenity links on one transaction.
    pub async fn create_room(&self, request: RoomRequest) -> DomainResult<Room> {
        if request.price < 0 {
            return Err(DomainError::Validation("price must not be negative".into()));
        }
        require_non_blank("name", &request.name)?;
        let amenity_ids = dedup_ids(&request.amenity_ids);
        let property_id = request.property_id;

        let txn = self.db.begin().await?;
        let result = self.create_room_in(&txn, request, &amenity_ids).await;
        let room = finish(txn, result).await?;

        info!(room_id = room.id, property_id, price = room.price, "Room created");
        Ok(room)
    }

    async fn create_room_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        request: RoomRequest,
        amenity_ids: &[i32],
    ) -> DomainResult<Room> {
        let repos = RepositoryContext::new(conn);
        let property_id = request.property_id;
        let property = repos
            .properties()
            .find_by_id(property_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Property", property_id))?;
        if property.status == PropertyStatus::Deleted {
            return Err(DomainError::Validation(format!(
                "Property {} is deleted",
                property_id
            )));
        }
        require_amenities(&repos, amenity_ids).await?;

        let room = repos
            .rooms()
            .insert(
                NewRoom {
                    property_id,
                    name: request.name,
                    price: request.price,
                },
                self.clock.now(),
            )
            .await?;
        repos.amenities().link_room(room.id, amenity_ids).await?;
        Ok(room)
    }

    pub async fn set_room_status(&self, id: i32, status: &str) -> DomainResult<Room> {
        let status = status.parse::<RoomStatus>()?;
        let room = self.repos().rooms().set_status(id, status).await?;
        info!(room_id = id, status = %status, "Room status updated");
        Ok(room)
    }

    pub async fn delete_room(&self, id: i32) -> DomainResult<Room> {
        let room = self.repos().rooms().set_status(id, RoomStatus::Deleted).await?;
        info!(room_id = id, "Room deleted");
        Ok(room)
    }

    /// Non-deleted rooms of a property with their amenities. Unknown
    /// property is not found.
    pub async fn rooms_for_property(&self, property_id: i32) -> DomainResult<Vec<RoomWithAmenities>> {
        let repos = self.repos();
        if repos.properties().find_by_id(property_id).await?.is_none() {
            return Err(DomainError::not_found("Property", property_id));
        }
        let rooms = repos.rooms().find_by_property(property_id).await?;
        with_amenities(&repos, rooms).await
    }

    pub async fn create_amenity(&self, name: String, kind: String) -> DomainResult<Amenity> {
        require_non_blank("name", &name)?;
        require_non_blank("type", &kind)?;
        let amenity = self
            .repos()
            .amenities()
            .insert(NewAmenity { name, kind }, self.clock.now())
            .await?;
        info!(amenity_id = amenity.id, kind = %amenity.kind, "Amenity created");
        Ok(amenity)
    }

    pub async fn list_amenities(&self) -> DomainResult<Vec<Amenity>> {
        self.repos().amenities().list_active().await
    }

    /// Soft delete: existing links stay but listings stop showing it.
    pub async fn delete_amenity(&self, id: i32) -> DomainResult<Amenity> {
        let amenity = self.repos().amenities().mark_deleted(id).await?;
        info!(amenity_id = id, "Amenity deleted");
        Ok(amenity)
    }
}

/// Every id must name a non-deleted amenity; `ids` is sorted and unique.
async fn require_amenities<C: ConnectionTrait>(
    repos: &RepositoryContext<'_, C>,
    ids: &[i32],
) -> DomainResult<()> {
    let found = repos.amenities().find_active_by_ids(ids).await?;
    if let Some(&missing) = ids.iter().find(|id| !found.iter().any(|a| a.id == **id)) {
        return Err(DomainError::not_found("Amenity", missing));
    }
    Ok(())
}

async fn with_amenities<C: ConnectionTrait>(
    repos: &RepositoryContext<'_, C>,
    rooms: Vec<Room>,
) -> DomainResult<Vec<RoomWithAmenities>> {
    let ids: Vec<i32> = rooms.iter().map(|r| r.id).collect();
    let mut amenities = repos.amenities().for_rooms(&ids).await?;
    Ok(rooms
        .into_iter()
        .map(|room| RoomWithAmenities {
            amenities: amenities.remove(&room.id).unwrap_or_default(),
            room,
        })
        .collect())
}

fn require_non_blank(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}
