//! Database entities module

pub mod amenity;
pub mod booking;
pub mod booking_room;
pub mod deposit;
pub mod property;
pub mod property_amenity;
pub mod room;
pub mod room_amenity;

pub use amenity::Entity as Amenity;
pub use booking::Entity as Booking;
pub use booking_room::Entity as BookingRoom;
pub use deposit::Entity as Deposit;
pub use property::Entity as Property;
pub use property_amenity::Entity as PropertyAmenity;
pub use room::Entity as Room;
pub use room_amenity::Entity as RoomAmenity;
