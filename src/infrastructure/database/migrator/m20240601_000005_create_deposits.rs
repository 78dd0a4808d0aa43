//! Create deposits table

use sea_orm_migration::prelude::*;

use super::m20240601_000003_create_bookings::Bookings;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Deposits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Deposits::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Deposits::BookingId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Deposits::Amount).double().not_null())
                    .col(ColumnDef::new(Deposits::ProofUrl).string_len(255))
                    .col(
                        ColumnDef::new(Deposits::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_deposits_booking")
                            .from(Deposits::Table, Deposits::BookingId)
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Deposits::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Deposits {
    Table,
    Id,
    BookingId,
    Amount,
    ProofUrl,
    CreatedAt,
}
