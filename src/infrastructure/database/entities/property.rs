//! Property entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub agent_id: i32,
    pub name: String,
    pub address: String,

    /// Listing category, e.g. HOTEL
    pub property_type: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,

    /// AVAILABLE, REPAIRING, DELETED
    pub status: String,

    /// Local time of the property, minutes east of UTC
    pub utc_offset_minutes: i32,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::room::Entity")]
    Room,
    #[sea_orm(has_many = "super::booking::Entity")]
    Booking,
}

impl Related<super::room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Room.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Booking.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
