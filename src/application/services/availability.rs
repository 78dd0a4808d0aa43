//! Availability checker
//!
//! A room is free for `[start, end)` when no PENDING, CONFIRMED or CHECKIN
//! booking attached to it overlaps the interval. Callers that go on to
//! insert must run this on the same transaction as the insert.

use sea_orm::ConnectionTrait;
use tracing::debug;

use crate::domain::{DomainResult, StayInterval};
use crate::infrastructure::database::repositories::BookingRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Clear,
    /// First room found with an overlapping occupying booking
    Conflict { room_id: i32 },
}

impl Availability {
    pub fn is_clear(&self) -> bool {
        matches!(self, Self::Clear)
    }
}

/// Check a single room against the interval. `exclude_booking_id` skips a
/// booking's own rows when it is being reactivated.
pub async fn check_room<C: ConnectionTrait>(
    bookings: &BookingRepository<'_, C>,
    room_id: i32,
    interval: &StayInterval,
    exclude_booking_id: Option<i32>,
) -> DomainResult<Availability> {
    match bookings
        .find_overlapping(room_id, interval, exclude_booking_id)
        .await?
    {
        Some(booking_id) => {
            debug!(room_id, booking_id, "Room is occupied in requested interval");
            Ok(Availability::Conflict { room_id })
        }
        None => Ok(Availability::Clear),
    }
}

/// Check every room in order and stop at the first conflict.
pub async fn check_available<C: ConnectionTrait>(
    bookings: &BookingRepository<'_, C>,
    room_ids: &[i32],
    interval: &StayInterval,
) -> DomainResult<Availability> {
    for &room_id in room_ids {
        let availability = check_room(bookings, room_id, interval, None).await?;
        if !availability.is_clear() {
            return Ok(availability);
        }
    }
    Ok(Availability::Clear)
}
