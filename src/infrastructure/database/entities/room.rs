//! Room entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub property_id: i32,
    pub name: String,

    /// Nightly price in whole currency units
    pub price: i64,

    /// AVAILABLE, NOTAVAILABLE, DELETED
    pub status: String,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::property::Entity",
        from = "Column::PropertyId",
        to = "super::property::Column::Id"
    )]
    Property,
    #[sea_orm(has_many = "super::booking_room::Entity")]
    BookingRoom,
}

impl Related<super::property::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Property.def()
    }
}

impl Related<super::booking_room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookingRoom.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
