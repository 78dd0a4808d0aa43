//! Database repository implementations
//!
//! Repositories borrow any `ConnectionTrait`, so the same code runs against
//! the pool for reads and against a `DatabaseTransaction` for admission.

pub mod amenity_repository;
pub mod booking_repository;
pub mod property_repository;
pub mod room_repository;

use sea_orm::ConnectionTrait;

pub use amenity_repository::AmenityRepository;
pub use booking_repository::{BookingRecord, BookingRepository};
pub use property_repository::PropertyRepository;
pub use room_repository::RoomRepository;

/// Per-aggregate repositories bound to one connection handle.
///
/// ```ignore
/// let txn = db.begin().await?;
/// let repos = RepositoryContext::new(&txn);
/// let room = repos.rooms().find_for_update(7).await?;
/// ```
pub struct RepositoryContext<'c, C: ConnectionTrait> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> RepositoryContext<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    pub fn properties(&self) -> PropertyRepository<'c, C> {
        PropertyRepository::new(self.conn)
    }

    pub fn rooms(&self) -> RoomRepository<'c, C> {
        RoomRepository::new(self.conn)
    }

    pub fn amenities(&self) -> AmenityRepository<'c, C> {
        AmenityRepository::new(self.conn)
    }

    pub fn bookings(&self) -> BookingRepository<'c, C> {
        BookingRepository::new(self.conn)
    }
}
