//! Add listing details to properties

use sea_orm_migration::prelude::*;

use super::m20240601_000001_create_properties::Properties;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // SQLite takes one column per ALTER TABLE
        manager
            .alter_table(
                Table::alter()
                    .table(Properties::Table)
                    .add_column(
                        ColumnDef::new(PropertyDetails::PropertyType)
                            .string_len(50)
                            .not_null()
                            .default("HOTEL"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Properties::Table)
                    .add_column(ColumnDef::new(PropertyDetails::Description).text())
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Properties::Table)
                    .add_column(ColumnDef::new(PropertyDetails::Longitude).double())
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Properties::Table)
                    .add_column(ColumnDef::new(PropertyDetails::Latitude).double())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for column in [
            PropertyDetails::Latitude,
            PropertyDetails::Longitude,
            PropertyDetails::Description,
            PropertyDetails::PropertyType,
        ] {
            manager
                .alter_table(
                    Table::alter()
                        .table(Properties::Table)
                        .drop_column(column)
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }
}

#[derive(Iden)]
enum PropertyDetails {
    PropertyType,
    Description,
    Longitude,
    Latitude,
}
