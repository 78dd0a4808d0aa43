//! Shared fixtures: in-memory SQLite migrated with the real migrator.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

use stay_booking::application::{
    BookingRequest, BookingService, CatalogService, PropertyRequest, RoomRequest,
};
use stay_booking::domain::{NewDeposit, Property, Room};
use stay_booking::infrastructure::database::migrator::Migrator;
use stay_booking::shared::clock::{FixedClock, SharedClock};
use stay_booking::{init_database, DatabaseConfig};

pub const AGENT: i32 = 10;
pub const GUEST: i32 = 77;

pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
}

pub fn clock(now: DateTime<Utc>) -> SharedClock {
    Arc::new(FixedClock(now))
}

pub async fn setup_db() -> DatabaseConnection {
    let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub struct Fixture {
    pub db: DatabaseConnection,
    pub bookings: BookingService,
    pub catalog: CatalogService,
}

impl Fixture {
    pub async fn new() -> Self {
        let db = setup_db().await;
        Self {
            bookings: BookingService::new(db.clone(), clock(at(1, 0))),
            catalog: CatalogService::new(db.clone(), clock(at(1, 0)), 0),
            db,
        }
    }

    /// Booking service over the same database with a different "now".
    pub fn bookings_at(&self, now: DateTime<Utc>) -> BookingService {
        BookingService::new(self.db.clone(), clock(now))
    }

    pub async fn property(&self, offset_minutes: i32) -> Property {
        self.catalog
            .create_property(property_request(Some(offset_minutes)))
            .await
            .unwrap()
    }

    pub async fn room(&self, property: &Property, price: i64) -> Room {
        self.catalog
            .create_room(RoomRequest {
                property_id: property.id,
                name: format!("Room {}", price),
                price,
                amenity_ids: Vec::new(),
            })
            .await
            .unwrap()
    }
}

pub fn property_request(utc_offset_minutes: Option<i32>) -> PropertyRequest {
    PropertyRequest {
        agent_id: AGENT,
        name: "Riverside".into(),
        address: "1 River Rd".into(),
        property_type: "HOTEL".into(),
        description: None,
        longitude: None,
        latitude: None,
        utc_offset_minutes,
        amenity_ids: Vec::new(),
    }
}

pub fn request(
    property: &Property,
    rooms: &[&Room],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> BookingRequest {
    BookingRequest {
        user_id: GUEST,
        property_id: property.id,
        room_ids: rooms.iter().map(|r| r.id).collect(),
        start_date: start,
        end_date: end,
        declared_total: None,
        deposit: None,
    }
}

pub fn deposit(amount: f64) -> Option<NewDeposit> {
    Some(NewDeposit {
        amount,
        proof_url: Some("https://files.example/proof.png".into()),
    })
}
