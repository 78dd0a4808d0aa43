//! Booking aggregate
//!
//! Contains the Booking entity, its lifecycle rules and pricing arithmetic.

pub mod interval;
pub mod lifecycle;
pub mod model;
pub mod pricing;

pub use interval::StayInterval;
pub use lifecycle::{apply_status, check_in_window, CheckInWindow};
pub use model::{Booking, BookingDetails, BookingStatus, Deposit, NewDeposit};
