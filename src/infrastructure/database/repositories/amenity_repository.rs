//! SeaORM amenity repository
//!
//! Owns the amenity table and both link tables. Listings go through
//! `for_properties` / `for_rooms`, which drop soft-deleted amenities.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::amenity::dedup_ids;
use crate::domain::{Amenity, DomainError, DomainResult, NewAmenity};
use crate::infrastructure::database::entities::{amenity, property_amenity, room_amenity};

pub struct AmenityRepository<'c, C: ConnectionTrait> {
    conn: &'c C,
}

fn model_to_domain(m: amenity::Model) -> Amenity {
    Amenity {
        id: m.id,
        name: m.name,
        kind: m.kind,
        deleted: m.is_deleted,
        created_at: m.created_at,
    }
}

impl<'c, C: ConnectionTrait> AmenityRepository<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, a: NewAmenity, now: DateTime<Utc>) -> DomainResult<Amenity> {
        debug!("Inserting amenity {:?}", a.name);

        let model = amenity::ActiveModel {
            name: Set(a.name),
            kind: Set(a.kind),
            is_deleted: Set(false),
            created_at: Set(now),
            ..Default::default()
        };
        let inserted = model.insert(self.conn).await?;
        Ok(model_to_domain(inserted))
    }

    /// Non-deleted amenities by id, ascending. Missing or deleted ids are skipped.
    pub async fn find_active_by_ids(&self, ids: &[i32]) -> DomainResult<Vec<Amenity>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = amenity::Entity::find()
            .filter(amenity::Column::Id.is_in(ids.iter().copied()))
            .filter(amenity::Column::IsDeleted.eq(false))
            .order_by_asc(amenity::Column::Id)
            .all(self.conn)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    /// All non-deleted amenities, by kind then name.
    pub async fn list_active(&self) -> DomainResult<Vec<Amenity>> {
        let models = amenity::Entity::find()
            .filter(amenity::Column::IsDeleted.eq(false))
            .order_by_asc(amenity::Column::Kind)
            .order_by_asc(amenity::Column::Name)
            .all(self.conn)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    /// Set the soft-delete flag. Unknown id is not found.
    pub async fn mark_deleted(&self, id: i32) -> DomainResult<Amenity> {
        debug!("Marking amenity {} deleted", id);

        let existing = amenity::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or_else(|| DomainError::not_found("Amenity", id))?;

        let mut active: amenity::ActiveModel = existing.into();
        active.is_deleted = Set(true);
        let updated = active.update(self.conn).await?;
        Ok(model_to_domain(updated))
    }

    pub async fn link_property(&self, property_id: i32, amenity_ids: &[i32]) -> DomainResult<()> {
        if amenity_ids.is_empty() {
            return Ok(());
        }
        debug!("Linking {} amenities to property {}", amenity_ids.len(), property_id);

        let rows = amenity_ids
            .iter()
            .map(|&amenity_id| property_amenity::ActiveModel {
                property_id: Set(property_id),
                amenity_id: Set(amenity_id),
            });
        property_amenity::Entity::insert_many(rows)
            .exec_without_returning(self.conn)
            .await?;
        Ok(())
    }

    pub async fn link_room(&self, room_id: i32, amenity_ids: &[i32]) -> DomainResult<()> {
        if amenity_ids.is_empty() {
            return Ok(());
        }
        debug!("Linking {} amenities to room {}", amenity_ids.len(), room_id);

        let rows = amenity_ids.iter().map(|&amenity_id| room_amenity::ActiveModel {
            room_id: Set(room_id),
            amenity_id: Set(amenity_id),
        });
        room_amenity::Entity::insert_many(rows)
            .exec_without_returning(self.conn)
            .await?;
        Ok(())
    }

    /// Non-deleted amenities of each property; properties without any are absent.
    pub async fn for_properties(
        &self,
        property_ids: &[i32],
    ) -> DomainResult<HashMap<i32, Vec<Amenity>>> {
        if property_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let links = property_amenity::Entity::find()
            .filter(property_amenity::Column::PropertyId.is_in(property_ids.iter().copied()))
            .all(self.conn)
            .await?
            .into_iter()
            .map(|l| (l.property_id, l.amenity_id))
            .collect::<Vec<_>>();
        self.group(links).await
    }

    /// Non-deleted amenities of each room; rooms without any are absent.
    pub async fn for_rooms(&self, room_ids: &[i32]) -> DomainResult<HashMap<i32, Vec<Amenity>>> {
        if room_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let links = room_amenity::Entity::find()
            .filter(room_amenity::Column::RoomId.is_in(room_ids.iter().copied()))
            .all(self.conn)
            .await?
            .into_iter()
            .map(|l| (l.room_id, l.amenity_id))
            .collect::<Vec<_>>();
        self.group(links).await
    }

    async fn group(&self, links: Vec<(i32, i32)>) -> DomainResult<HashMap<i32, Vec<Amenity>>> {
        let amenity_ids: Vec<i32> = links.iter().map(|&(_, a)| a).collect();
        let amenity_ids = dedup_ids(&amenity_ids);

        let amenities: HashMap<i32, Amenity> = self
            .find_active_by_ids(&amenity_ids)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        let mut grouped: HashMap<i32, Vec<Amenity>> = HashMap::new();
        for (owner, amenity_id) in links {
            if let Some(a) = amenities.get(&amenity_id) {
                grouped.entry(owner).or_default().push(a.clone());
            }
        }
        for list in grouped.values_mut() {
            list.sort_by_key(|a| a.id);
        }
        Ok(grouped)
    }
}
