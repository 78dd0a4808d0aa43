//! Booking endpoints: admission, status updates, quote and lookups

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
