//! SeaORM room repository

use chrono::{DateTime, Utc};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::domain::{DomainError, DomainResult, NewRoom, Room, RoomStatus};
use crate::infrastructure::database::entities::room;

pub struct RoomRepository<'c, C: ConnectionTrait> {
    conn: &'c C,
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: room::Model) -> DomainResult<Room> {
    let status = m
        .status
        .parse::<RoomStatus>()
        .map_err(|_| DomainError::Corrupted(format!("room {} has status {:?}", m.id, m.status)))?;
    Ok(Room {
        id: m.id,
        property_id: m.property_id,
        name: m.name,
        price: m.price,
        status,
        created_at: m.created_at,
    })
}

fn models_to_domain(models: Vec<room::Model>) -> DomainResult<Vec<Room>> {
    models.into_iter().map(model_to_domain).collect()
}

impl<'c, C: ConnectionTrait> RoomRepository<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, r: NewRoom, now: DateTime<Utc>) -> DomainResult<Room> {
        debug!("Inserting room into property {}", r.property_id);

        let model = room::ActiveModel {
            property_id: Set(r.property_id),
            name: Set(r.name),
            price: Set(r.price),
            status: Set(RoomStatus::Available.as_str().to_string()),
            created_at: Set(now),
            ..Default::default()
        };
        let inserted = model.insert(self.conn).await?;
        model_to_domain(inserted)
    }

    pub async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>> {
        room::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .map(model_to_domain)
            .transpose()
    }

    /// Load a room with `SELECT ... FOR UPDATE`.
    ///
    /// Concurrent admissions touching the same room queue on this lock until
    /// the holder commits or rolls back. SQLite ignores the clause; its
    /// single-writer transactions serialise instead.
    pub async fn find_for_update(&self, id: i32) -> DomainResult<Option<Room>> {
        room::Entity::find_by_id(id)
            .lock_exclusive()
            .one(self.conn)
            .await?
            .map(model_to_domain)
            .transpose()
    }

    /// Rooms by id, ascending. Missing ids are skipped.
    pub async fn find_by_ids(&self, ids: &[i32]) -> DomainResult<Vec<Room>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = room::Entity::find()
            .filter(room::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(room::Column::Id)
            .all(self.conn)
            .await?;
        models_to_domain(models)
    }

    /// Non-deleted rooms of a property.
    pub async fn find_by_property(&self, property_id: i32) -> DomainResult<Vec<Room>> {
        self.find_by_properties(&[property_id]).await
    }

    /// Non-deleted rooms across several properties, ordered by property then id.
    pub async fn find_by_properties(&self, property_ids: &[i32]) -> DomainResult<Vec<Room>> {
        if property_ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = room::Entity::find()
            .filter(room::Column::PropertyId.is_in(property_ids.iter().copied()))
            .filter(room::Column::Status.ne(RoomStatus::Deleted.as_str()))
            .order_by_asc(room::Column::PropertyId)
            .order_by_asc(room::Column::Id)
            .all(self.conn)
            .await?;
        models_to_domain(models)
    }

    pub async fn set_status(&self, id: i32, status: RoomStatus) -> DomainResult<Room> {
        debug!("Setting room {} status to {}", id, status);

        let existing = room::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or_else(|| DomainError::not_found("Room", id))?;

        let mut active: room::ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        let updated = active.update(self.conn).await?;
        model_to_domain(updated)
    }
}
