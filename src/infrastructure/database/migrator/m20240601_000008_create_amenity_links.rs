//! Create property_amenities and room_amenities junction tables

use sea_orm_migration::prelude::*;

use super::m20240601_000001_create_properties::Properties;
use super::m20240601_000002_create_rooms::Rooms;
use super::m20240601_000006_create_amenities::Amenities;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PropertyAmenities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PropertyAmenities::PropertyId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PropertyAmenities::AmenityId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(PropertyAmenities::PropertyId)
                            .col(PropertyAmenities::AmenityId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_amenities_property")
                            .from(PropertyAmenities::Table, PropertyAmenities::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_property_amenities_amenity")
                            .from(PropertyAmenities::Table, PropertyAmenities::AmenityId)
                            .to(Amenities::Table, Amenities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RoomAmenities::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(RoomAmenities::RoomId).integer().not_null())
                    .col(ColumnDef::new(RoomAmenities::AmenityId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(RoomAmenities::RoomId)
                            .col(RoomAmenities::AmenityId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_room_amenities_room")
                            .from(RoomAmenities::Table, RoomAmenities::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_room_amenities_amenity")
                            .from(RoomAmenities::Table, RoomAmenities::AmenityId)
                            .to(Amenities::Table, Amenities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RoomAmenities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PropertyAmenities::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PropertyAmenities {
    Table,
    PropertyId,
    AmenityId,
}

#[derive(Iden)]
enum RoomAmenities {
    Table,
    RoomId,
    AmenityId,
}
