//! Booking service
//!
//! Admission runs every check and write on one transaction: rooms are
//! locked in ascending id order, checked for status and overlap, priced,
//! then the property is checked and the booking, junction rows and
//! optional deposit are inserted. Any failure rolls the whole thing back.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use tracing::{info, warn};

use super::availability::{check_available, check_room, Availability};
use super::finish;
use crate::domain::booking::{apply_status, pricing};
use crate::domain::{
    Booking, BookingDetails, BookingStatus, DomainError, DomainResult, NewDeposit, Property, Room,
    StayInterval,
};
use crate::infrastructure::database::repositories::{BookingRecord, RepositoryContext};
use crate::shared::clock::SharedClock;

/// A guest's request to book rooms of one property
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub user_id: i32,
    pub property_id: i32,
    pub room_ids: Vec<i32>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Total the client expects to pay; must equal the computed total
    pub declared_total: Option<f64>,
    pub deposit: Option<NewDeposit>,
}

#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub room_ids: Vec<i32>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Availability and price preview for a prospective booking
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub available: bool,
    pub conflicting_room_id: Option<i32>,
    pub nights: f64,
    pub total_price: f64,
}

pub struct BookingService {
    db: DatabaseConnection,
    clock: SharedClock,
}

impl BookingService {
    pub fn new(db: DatabaseConnection, clock: SharedClock) -> Self {
        Self { db, clock }
    }

    /// Admit a booking request or reject it without persisting anything.
    pub async fn create_booking(&self, req: BookingRequest) -> DomainResult<BookingDetails> {
        let user_id = req.user_id;
        let property_id = req.property_id;

        match self.admit(req).await {
            Ok(details) => {
                metrics::counter!("bookings_created_total").increment(1);
                info!(
                    booking_id = details.booking.id,
                    user_id,
                    property_id,
                    rooms = ?details.booking.room_ids,
                    status = %details.booking.status,
                    total_price = details.booking.total_price,
                    "Booking admitted"
                );
                Ok(details)
            }
            Err(e) => {
                metrics::counter!("bookings_rejected_total", "reason" => e.kind()).increment(1);
                warn!(user_id, property_id, reason = e.kind(), error = %e, "Booking rejected");
                Err(e)
            }
        }
    }

    async fn admit(&self, req: BookingRequest) -> DomainResult<BookingDetails> {
        let interval = StayInterval::new(req.start_date, req.end_date)?;
        let room_ids = normalize_room_ids(&req.room_ids)?;
        if let Some(deposit) = &req.deposit {
            deposit.validate()?;
        }

        let txn = self.db.begin().await?;
        let result = self.admit_in(&txn, &req, &room_ids, interval).await;
        finish(txn, result).await
    }

    async fn admit_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        req: &BookingRequest,
        room_ids: &[i32],
        interval: StayInterval,
    ) -> DomainResult<BookingDetails> {
        let repos = RepositoryContext::new(conn);
        let bookings = repos.bookings();

        // 1. rooms: lock, status, overlap, price
        let mut rooms = Vec::with_capacity(room_ids.len());
        for &room_id in room_ids {
            let room = repos
                .rooms()
                .find_for_update(room_id)
                .await?
                .ok_or_else(|| DomainError::not_found("Room", room_id))?;

            if room.property_id != req.property_id {
                return Err(DomainError::Validation(format!(
                    "Room {} does not belong to property {}",
                    room_id, req.property_id
                )));
            }
            if !room.is_bookable() {
                return Err(DomainError::Unavailable {
                    entity: "Room",
                    id: room_id,
                    status: room.status.to_string(),
                });
            }
            if let Availability::Conflict { room_id } =
                check_room(&bookings, room_id, &interval, None).await?
            {
                return Err(DomainError::RoomConflict { room_id });
            }
            rooms.push(room);
        }
        let total_price = pricing::compute_total(rooms.iter().map(|r| r.price), &interval);

        // 2. property
        let property = repos
            .properties()
            .find_for_share(req.property_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Property", req.property_id))?;
        if !property.is_bookable() {
            return Err(DomainError::Unavailable {
                entity: "Property",
                id: property.id,
                status: property.status.to_string(),
            });
        }

        if let Some(declared) = req.declared_total {
            if !pricing::matches_declared(declared, total_price) {
                return Err(DomainError::PriceMismatch {
                    declared,
                    computed: total_price,
                });
            }
        }

        // 3. initial status
        let status = BookingStatus::initial(req.deposit.as_ref());
        let now = self.clock.now();

        // 4-6. writes
        let record = BookingRecord {
            user_id: req.user_id,
            property_id: req.property_id,
            interval,
            status,
            total_price,
            created_at: now,
        };
        let booking_id = bookings.insert(&record).await?;
        bookings.attach_rooms(booking_id, room_ids).await?;
        let deposit = match &req.deposit {
            Some(d) => Some(bookings.record_deposit(booking_id, d, now).await?),
            None => None,
        };

        let booking = Booking {
            id: booking_id,
            user_id: record.user_id,
            property_id: record.property_id,
            room_ids: room_ids.to_vec(),
            start_date: interval.start(),
            end_date: interval.end(),
            status,
            total_price,
            deposit,
            created_at: now,
        };
        Ok(BookingDetails {
            booking,
            rooms,
            property,
        })
    }

    /// Manually move a booking to `status`.
    ///
    /// The target must be one of the five booking statuses. CHECKIN is only
    /// accepted inside the check-in window in the property's local time.
    /// Moving a CANCELED or CHECKOUT booking back to an occupying status
    /// re-runs the overlap check for its rooms.
    pub async fn update_status(&self, booking_id: i32, status: &str) -> DomainResult<BookingDetails> {
        let txn = self.db.begin().await?;
        let result = self.update_status_in(&txn, booking_id, status).await;
        let result = finish(txn, result).await;

        match &result {
            Ok(details) => {
                metrics::counter!(
                    "booking_status_updates_total",
                    "status" => details.booking.status.as_str()
                )
                .increment(1);
                info!(booking_id, status = %details.booking.status, "Booking status updated");
            }
            Err(e) => {
                warn!(booking_id, requested = status, error = %e, "Booking status update rejected");
            }
        }
        result
    }

    async fn update_status_in<C: ConnectionTrait>(
        &self,
        conn: &C,
        booking_id: i32,
        status: &str,
    ) -> DomainResult<BookingDetails> {
        let repos = RepositoryContext::new(conn);

        let mut booking = repos
            .bookings()
            .find_for_update(booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", booking_id))?;
        let target = status.parse::<BookingStatus>()?;

        let property = repos
            .properties()
            .find_by_id(booking.property_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Property", booking.property_id))?;

        let previous = booking.status;
        apply_status(&mut booking, target, self.clock.now(), property.local_offset())?;
        if !previous.is_occupying() && target.is_occupying() {
            reclaim_rooms(&repos, &booking).await?;
        }
        repos.bookings().update_status(booking_id, target).await?;

        let rooms = repos.rooms().find_by_ids(&booking.room_ids).await?;
        Ok(BookingDetails {
            booking,
            rooms,
            property,
        })
    }

    /// Price and availability preview. Nothing is written.
    pub async fn quote(&self, req: QuoteRequest) -> DomainResult<Quote> {
        let interval = StayInterval::new(req.start_date, req.end_date)?;
        let room_ids = normalize_room_ids(&req.room_ids)?;

        let txn = self.db.begin().await?;
        let result = quote_in(&txn, &room_ids, interval).await;
        finish(txn, result).await
    }

    pub async fn get_booking(&self, booking_id: i32) -> DomainResult<BookingDetails> {
        let repos = RepositoryContext::new(&self.db);
        let booking = repos
            .bookings()
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", booking_id))?;

        let mut details = with_details(&repos, vec![booking]).await?;
        details
            .pop()
            .ok_or_else(|| DomainError::not_found("Booking", booking_id))
    }

    /// Bookings made by a user, newest first.
    pub async fn bookings_for_user(&self, user_id: i32) -> DomainResult<Vec<BookingDetails>> {
        let repos = RepositoryContext::new(&self.db);
        let bookings = repos.bookings().find_by_user(user_id).await?;
        with_details(&repos, bookings).await
    }

    /// Bookings across all properties of an agent, newest first.
    ///
    /// An agent without any property is reported as not found.
    pub async fn bookings_for_agent(&self, agent_id: i32) -> DomainResult<Vec<BookingDetails>> {
        let repos = RepositoryContext::new(&self.db);
        let property_ids = repos.properties().ids_for_agent(agent_id).await?;
        if property_ids.is_empty() {
            return Err(DomainError::NotFound {
                entity: "Property",
                field: "agentId",
                value: agent_id.to_string(),
            });
        }
        let bookings = repos.bookings().find_by_properties(&property_ids).await?;
        with_details(&repos, bookings).await
    }
}

async fn quote_in<C: ConnectionTrait>(
    conn: &C,
    room_ids: &[i32],
    interval: StayInterval,
) -> DomainResult<Quote> {
    let repos = RepositoryContext::new(conn);

    let rooms = repos.rooms().find_by_ids(room_ids).await?;
    if let Some(missing) = room_ids
        .iter()
        .find(|id| !rooms.iter().any(|r| r.id == **id))
    {
        return Err(DomainError::not_found("Room", *missing));
    }
    if let Some(room) = rooms.iter().find(|r| !r.is_bookable()) {
        return Err(DomainError::Unavailable {
            entity: "Room",
            id: room.id,
            status: room.status.to_string(),
        });
    }

    let availability = check_available(&repos.bookings(), room_ids, &interval).await?;
    let conflicting_room_id = match availability {
        Availability::Conflict { room_id } => Some(room_id),
        Availability::Clear => None,
    };

    Ok(Quote {
        available: availability.is_clear(),
        conflicting_room_id,
        nights: pricing::nights(&interval),
        total_price: pricing::compute_total(rooms.iter().map(|r| r.price), &interval),
    })
}

/// Re-lock a released booking's rooms and make sure nothing else took them
/// in the meantime.
async fn reclaim_rooms<C: ConnectionTrait>(
    repos: &RepositoryContext<'_, C>,
    booking: &Booking,
) -> DomainResult<()> {
    let interval = StayInterval::new(booking.start_date, booking.end_date).map_err(|_| {
        DomainError::Corrupted(format!("booking {} has an empty stay interval", booking.id))
    })?;
    let mut room_ids = booking.room_ids.clone();
    room_ids.sort_unstable();

    let bookings = repos.bookings();
    for room_id in room_ids {
        if repos.rooms().find_for_update(room_id).await?.is_none() {
            return Err(DomainError::not_found("Room", room_id));
        }
        if let Availability::Conflict { room_id } =
            check_room(&bookings, room_id, &interval, Some(booking.id)).await?
        {
            return Err(DomainError::RoomConflict { room_id });
        }
    }
    Ok(())
}

/// Join bookings with their rooms and property, preserving order.
async fn with_details<C: ConnectionTrait>(
    repos: &RepositoryContext<'_, C>,
    bookings: Vec<Booking>,
) -> DomainResult<Vec<BookingDetails>> {
    let room_ids: Vec<i32> = bookings
        .iter()
        .flat_map(|b| b.room_ids.iter().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let property_ids: Vec<i32> = bookings
        .iter()
        .map(|b| b.property_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let rooms: HashMap<i32, Room> = repos
        .rooms()
        .find_by_ids(&room_ids)
        .await?
        .into_iter()
        .map(|r| (r.id, r))
        .collect();
    let properties: HashMap<i32, Property> = repos
        .properties()
        .find_by_ids(&property_ids)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    bookings
        .into_iter()
        .map(|booking| {
            let property = properties.get(&booking.property_id).cloned().ok_or_else(|| {
                DomainError::Corrupted(format!(
                    "booking {} refers to missing property {}",
                    booking.id, booking.property_id
                ))
            })?;
            let rooms = booking
                .room_ids
                .iter()
                .filter_map(|id| rooms.get(id).cloned())
                .collect();
            Ok(BookingDetails {
                booking,
                rooms,
                property,
            })
        })
        .collect()
}

/// Requested rooms in ascending id order. Empty or repeated ids are rejected.
fn normalize_room_ids(room_ids: &[i32]) -> DomainResult<Vec<i32>> {
    if room_ids.is_empty() {
        return Err(DomainError::Validation(
            "at least one room is required".into(),
        ));
    }
    let unique: BTreeSet<i32> = room_ids.iter().copied().collect();
    if unique.len() != room_ids.len() {
        return Err(DomainError::Validation(
            "roomIds must not contain duplicates".into(),
        ));
    }
    Ok(unique.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_ids_are_sorted() {
        assert_eq!(normalize_room_ids(&[9, 2, 5]).unwrap(), vec![2, 5, 9]);
    }

    #[test]
    fn empty_room_list_is_rejected() {
        assert!(matches!(
            normalize_room_ids(&[]),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn duplicate_room_ids_are_rejected() {
        assert!(matches!(
            normalize_room_ids(&[3, 4, 3]),
            Err(DomainError::Validation(_))
        ));
    }
}
