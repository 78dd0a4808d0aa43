//! SeaORM property repository

use chrono::{DateTime, Utc};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::domain::{DomainError, DomainResult, NewProperty, Property, PropertyStatus};
use crate::infrastructure::database::entities::property;

pub struct PropertyRepository<'c, C: ConnectionTrait> {
    conn: &'c C,
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: property::Model) -> DomainResult<Property> {
    let status = m.status.parse::<PropertyStatus>().map_err(|_| {
        DomainError::Corrupted(format!("property {} has status {:?}", m.id, m.status))
    })?;
    Ok(Property {
        id: m.id,
        agent_id: m.agent_id,
        name: m.name,
        address: m.address,
        property_type: m.property_type,
        description: m.description,
        longitude: m.longitude,
        latitude: m.latitude,
        status,
        utc_offset_minutes: m.utc_offset_minutes,
        created_at: m.created_at,
    })
}

impl<'c, C: ConnectionTrait> PropertyRepository<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, p: NewProperty, now: DateTime<Utc>) -> DomainResult<Property> {
        debug!("Inserting property for agent {}", p.agent_id);

        let model = property::ActiveModel {
            agent_id: Set(p.agent_id),
            name: Set(p.name),
            address: Set(p.address),
            property_type: Set(p.property_type),
            description: Set(p.description),
            longitude: Set(p.longitude),
            latitude: Set(p.latitude),
            status: Set(PropertyStatus::Available.as_str().to_string()),
            utc_offset_minutes: Set(p.utc_offset_minutes),
            created_at: Set(now),
            ..Default::default()
        };
        let inserted = model.insert(self.conn).await?;
        model_to_domain(inserted)
    }

    pub async fn find_by_id(&self, id: i32) -> DomainResult<Option<Property>> {
        property::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .map(model_to_domain)
            .transpose()
    }

    /// Properties by id, ascending. Missing ids are skipped.
    pub async fn find_by_ids(&self, ids: &[i32]) -> DomainResult<Vec<Property>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        property::Entity::find()
            .filter(property::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(property::Column::Id)
            .all(self.conn)
            .await?
            .into_iter()
            .map(model_to_domain)
            .collect()
    }

    /// Load a property and hold a shared row lock until the transaction ends.
    pub async fn find_for_share(&self, id: i32) -> DomainResult<Option<Property>> {
        property::Entity::find_by_id(id)
            .lock_shared()
            .one(self.conn)
            .await?
            .map(model_to_domain)
            .transpose()
    }

    /// Non-deleted properties of an agent, oldest first.
    pub async fn find_by_agent(&self, agent_id: i32) -> DomainResult<Vec<Property>> {
        property::Entity::find()
            .filter(property::Column::AgentId.eq(agent_id))
            .filter(property::Column::Status.ne(PropertyStatus::Deleted.as_str()))
            .order_by_asc(property::Column::Id)
            .all(self.conn)
            .await?
            .into_iter()
            .map(model_to_domain)
            .collect()
    }

    /// All property ids owned by an agent, deleted ones included.
    pub async fn ids_for_agent(&self, agent_id: i32) -> DomainResult<Vec<i32>> {
        let ids = property::Entity::find()
            .select_only()
            .column(property::Column::Id)
            .filter(property::Column::AgentId.eq(agent_id))
            .into_tuple::<i32>()
            .all(self.conn)
            .await?;
        Ok(ids)
    }

    pub async fn set_status(&self, id: i32, status: PropertyStatus) -> DomainResult<Property> {
        debug!("Setting property {} status to {}", id, status);

        let existing = property::Entity::find_by_id(id)
            .one(self.conn)
            .await?
            .ok_or_else(|| DomainError::not_found("Property", id))?;

        let mut active: property::ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        let updated = active.update(self.conn).await?;
        model_to_domain(updated)
    }
}
