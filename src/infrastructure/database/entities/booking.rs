//! Booking entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub user_id: i32,
    pub property_id: i32,

    /// Inclusive start of the stay
    pub start_date: DateTimeUtc,
    /// Exclusive end of the stay
    pub end_date: DateTimeUtc,

    /// PENDING, CONFIRMED, CHECKIN, CHECKOUT, CANCELED
    pub status: String,

    #[sea_orm(column_type = "Double")]
    pub total_price: f64,

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
    #[sea_orm(has_one = "super::deposit::Entity")]
    Deposit,
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

impl Related<super::deposit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deposit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
