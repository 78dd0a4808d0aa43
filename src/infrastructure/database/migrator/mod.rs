//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_properties;
mod m20240601_000002_create_rooms;
mod m20240601_000003_create_bookings;
mod m20240601_000004_create_booking_rooms;
mod m20240601_000005_create_deposits;
mod m20240601_000006_create_amenities;
mod m20240601_000007_add_property_details;
mod m20240601_000008_create_amenity_links;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_properties::Migration),
            Box::new(m20240601_000002_create_rooms::Migration),
            Box::new(m20240601_000003_create_bookings::Migration),
            Box::new(m20240601_000004_create_booking_rooms::Migration),
            Box::new(m20240601_000005_create_deposits::Migration),
            Box::new(m20240601_000006_create_amenities::Migration),
            Box::new(m20240601_000007_add_property_details::Migration),
            Box::new(m20240601_000008_create_amenity_links::Migration),
        ]
    }
}
