//! SeaORM booking repository
//!
//! Covers the `bookings` table plus its `booking_rooms` junction rows and
//! the optional `deposits` row.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use log::debug;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::domain::{
    Booking, BookingStatus, Deposit, DomainError, DomainResult, NewDeposit, StayInterval,
};
use crate::infrastructure::database::entities::{booking, booking_room, deposit};

pub struct BookingRepository<'c, C: ConnectionTrait> {
    conn: &'c C,
}

/// Column values for a booking row about to be inserted
#[derive(Debug, Clone)]
pub struct BookingRecord {
    pub user_id: i32,
    pub property_id: i32,
    pub interval: StayInterval,
    pub status: BookingStatus,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
}

// ── Conversion helpers ──────────────────────────────────────────

fn parse_status(m: &booking::Model) -> DomainResult<BookingStatus> {
    m.status.parse::<BookingStatus>().map_err(|_| {
        DomainError::Corrupted(format!("booking {} has status {:?}", m.id, m.status))
    })
}

fn deposit_to_domain(d: deposit::Model) -> Deposit {
    Deposit {
        id: d.id,
        booking_id: d.booking_id,
        amount: d.amount,
        proof_url: d.proof_url,
        created_at: d.created_at,
    }
}

fn model_to_domain(
    m: booking::Model,
    room_ids: Vec<i32>,
    deposit: Option<Deposit>,
) -> DomainResult<Booking> {
    let status = parse_status(&m)?;
    Ok(Booking {
        id: m.id,
        user_id: m.user_id,
        property_id: m.property_id,
        room_ids,
        start_date: m.start_date,
        end_date: m.end_date,
        status,
        total_price: m.total_price,
        deposit,
        created_at: m.created_at,
    })
}

impl<'c, C: ConnectionTrait> BookingRepository<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    /// Insert the booking row and return its id.
    pub async fn insert(&self, record: &BookingRecord) -> DomainResult<i32> {
        debug!(
            "Inserting booking for user {} at property {}",
            record.user_id, record.property_id
        );

        let model = booking::ActiveModel {
            user_id: Set(record.user_id),
            property_id: Set(record.property_id),
            start_date: Set(record.interval.start()),
            end_date: Set(record.interval.end()),
            status: Set(record.status.as_str().to_string()),
            total_price: Set(record.total_price),
            created_at: Set(record.created_at),
            ..Default::default()
        };
        let inserted = model.insert(self.conn).await?;
        Ok(inserted.id)
    }

    /// Insert one junction row per room.
    pub async fn attach_rooms(&self, booking_id: i32, room_ids: &[i32]) -> DomainResult<()> {
        if room_ids.is_empty() {
            return Ok(());
        }
        debug!("Attaching rooms {:?} to booking {}", room_ids, booking_id);

        let rows = room_ids.iter().map(|&room_id| booking_room::ActiveModel {
            booking_id: Set(booking_id),
            room_id: Set(room_id),
        });
        booking_room::Entity::insert_many(rows)
            .exec_without_returning(self.conn)
            .await?;
        Ok(())
    }

    pub async fn record_deposit(
        &self,
        booking_id: i32,
        d: &NewDeposit,
        now: DateTime<Utc>,
    ) -> DomainResult<Deposit> {
        debug!("Recording deposit of {} for booking {}", d.amount, booking_id);

        let model = deposit::ActiveModel {
            booking_id: Set(booking_id),
            amount: Set(d.amount),
            proof_url: Set(d.proof_url.clone()),
            created_at: Set(now),
            ..Default::default()
        };
        let inserted = model.insert(self.conn).await?;
        Ok(deposit_to_domain(inserted))
    }

    /// First occupying booking on `room_id` whose stay overlaps `interval`,
    /// ignoring `exclude_booking_id`.
    ///
    /// `[a,b)` and `[c,d)` overlap iff `a < d AND c < b`.
    pub async fn find_overlapping(
        &self,
        room_id: i32,
        interval: &StayInterval,
        exclude_booking_id: Option<i32>,
    ) -> DomainResult<Option<i32>> {
        let occupying = BookingStatus::OCCUPYING.iter().map(|s| s.as_str());

        let mut query = booking::Entity::find()
            .select_only()
            .column(booking::Column::Id)
            .inner_join(booking_room::Entity)
            .filter(booking_room::Column::RoomId.eq(room_id))
            .filter(booking::Column::Status.is_in(occupying))
            .filter(booking::Column::StartDate.lt(interval.end()))
            .filter(booking::Column::EndDate.gt(interval.start()));
        if let Some(excluded) = exclude_booking_id {
            query = query.filter(booking::Column::Id.ne(excluded));
        }

        let hit = query
            .order_by_asc(booking::Column::Id)
            .into_tuple::<i32>()
            .one(self.conn)
            .await?;
        Ok(hit)
    }

    pub async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>> {
        let Some(model) = booking::Entity::find_by_id(id).one(self.conn).await? else {
            return Ok(None);
        };
        let mut bookings = self.hydrate(vec![model]).await?;
        Ok(bookings.pop())
    }

    /// Load a booking for a status change, row-locked until commit.
    pub async fn find_for_update(&self, id: i32) -> DomainResult<Option<Booking>> {
        let Some(model) = booking::Entity::find_by_id(id)
            .lock_exclusive()
            .one(self.conn)
            .await?
        else {
            return Ok(None);
        };
        let mut bookings = self.hydrate(vec![model]).await?;
        Ok(bookings.pop())
    }

    /// Bookings made by a user, newest first.
    pub async fn find_by_user(&self, user_id: i32) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::UserId.eq(user_id))
            .order_by_desc(booking::Column::CreatedAt)
            .order_by_desc(booking::Column::Id)
            .all(self.conn)
            .await?;
        self.hydrate(models).await
    }

    /// Bookings at any of the given properties, newest first.
    pub async fn find_by_properties(&self, property_ids: &[i32]) -> DomainResult<Vec<Booking>> {
        if property_ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = booking::Entity::find()
            .filter(booking::Column::PropertyId.is_in(property_ids.iter().copied()))
            .order_by_desc(booking::Column::CreatedAt)
            .order_by_desc(booking::Column::Id)
            .all(self.conn)
            .await?;
        self.hydrate(models).await
    }

    /// Number of bookings per status, for every status that has at least one.
    pub async fn count_by_status(&self) -> DomainResult<Vec<(BookingStatus, u64)>> {
        let rows = booking::Entity::find()
            .select_only()
            .column(booking::Column::Status)
            .column_as(SimpleExpr::from(Func::count(Expr::col(booking::Column::Id))), "total")
            .group_by(booking::Column::Status)
            .into_tuple::<(String, i64)>()
            .all(self.conn)
            .await?;

        rows.into_iter()
            .map(|(status, total)| {
                let status = status.parse::<BookingStatus>().map_err(|_| {
                    DomainError::Corrupted(format!("booking status {:?} in store", status))
                })?;
                Ok((status, u64::try_from(total).unwrap_or_default()))
            })
            .collect()
    }

    /// Overwrite the status of a booking already loaded on this connection.
    pub async fn update_status(&self, id: i32, status: BookingStatus) -> DomainResult<()> {
        debug!("Updating booking {} status to {}", id, status);

        let result = booking::Entity::update_many()
            .col_expr(booking::Column::Status, Expr::value(status.as_str()))
            .filter(booking::Column::Id.eq(id))
            .exec(self.conn)
            .await?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Booking", id));
        }
        Ok(())
    }

    /// Attach room ids and deposits to booking rows, preserving row order.
    async fn hydrate(&self, models: Vec<booking::Model>) -> DomainResult<Vec<Booking>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();

        let links = booking_room::Entity::find()
            .filter(booking_room::Column::BookingId.is_in(ids.iter().copied()))
            .order_by_asc(booking_room::Column::BookingId)
            .order_by_asc(booking_room::Column::RoomId)
            .all(self.conn)
            .await?;
        let mut rooms_by_booking: HashMap<i32, Vec<i32>> = HashMap::new();
        for link in links {
            rooms_by_booking
                .entry(link.booking_id)
                .or_default()
                .push(link.room_id);
        }

        let deposits = deposit::Entity::find()
            .filter(deposit::Column::BookingId.is_in(ids.iter().copied()))
            .all(self.conn)
            .await?;
        let mut deposit_by_booking: HashMap<i32, Deposit> = deposits
            .into_iter()
            .map(|d| (d.booking_id, deposit_to_domain(d)))
            .collect();

        models
            .into_iter()
            .map(|m| {
                let room_ids = rooms_by_booking.remove(&m.id).unwrap_or_default();
                let deposit = deposit_by_booking.remove(&m.id);
                model_to_domain(m, room_ids, deposit)
            })
            .collect()
    }
}
