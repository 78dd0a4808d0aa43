//! Domain layer: booking entities, status machines and pure arithmetic.
//!
//! Nothing in here performs I/O; persistence lives in
//! `infrastructure::database` and orchestration in `application`.

pub mod amenity;
pub mod booking;
pub mod property;
pub mod room;

pub use amenity::{Amenity, NewAmenity};
pub use booking::{
    Booking, BookingDetails, BookingStatus, CheckInWindow, Deposit, NewDeposit, StayInterval,
};
pub use property::{NewProperty, Property, PropertyStatus};
pub use room::{NewRoom, Room, RoomStatus};

pub use crate::shared::errors::{DomainError, DomainResult};
