//! Amenity aggregate

pub mod model;

pub use model::{dedup_ids, Amenity, NewAmenity};
