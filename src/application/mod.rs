//! Application layer: admission, status updates, queries and catalog
//! maintenance, each running on its own database transaction.

pub mod services;

pub use services::{
    check_available, Availability, BookingRequest, BookingService, CatalogService,
    PropertyRequest, PropertyWithRooms, Quote, QuoteRequest, RoomRequest, RoomWithAmenities,
};
