//! Property aggregate

pub mod model;

pub use model::{
    validate_coordinates, validate_utc_offset, NewProperty, Property, PropertyStatus,
    MAX_UTC_OFFSET_MINUTES,
};
