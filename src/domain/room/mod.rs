//! Room aggregate

pub mod model;

pub use model::{NewRoom, Room, RoomStatus};
