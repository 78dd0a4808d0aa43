//! Booking DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::{BookingRequest, Quote, QuoteRequest};
use crate::domain::{BookingDetails, Deposit, NewDeposit};
use crate::interfaces::http::modules::properties::PropertySummaryDto;
use crate::interfaces::http::modules::rooms::RoomDto;

/// Request to book one or more rooms of a property
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[validate(range(min = 1))]
    pub user_id: i32,
    #[validate(range(min = 1))]
    pub property_id: i32,
    /// Rooms to book; at least one, no repeats
    #[validate(length(min = 1))]
    pub room_ids: Vec<i32>,
    /// Inclusive start (RFC 3339)
    pub start_date: DateTime<Utc>,
    /// Exclusive end (RFC 3339)
    pub end_date: DateTime<Utc>,
    /// Total the client expects to pay; rejected unless it equals the computed total
    pub total_price: Option<f64>,
    /// Deposit paid up front; its presence makes the booking PENDING
    pub deposit: Option<DepositRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepositRequest {
    pub amount: f64,
    /// Reference to an already uploaded proof of payment
    pub proof_url: Option<String>,
}

impl From<CreateBookingRequest> for BookingRequest {
    fn from(r: CreateBookingRequest) -> Self {
        Self {
            user_id: r.user_id,
            property_id: r.property_id,
            room_ids: r.room_ids,
            start_date: r.start_date,
            end_date: r.end_date,
            declared_total: r.total_price,
            deposit: r.deposit.map(|d| NewDeposit {
                amount: d.amount,
                proof_url: d.proof_url,
            }),
        }
    }
}

/// Request to change a booking's status
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingStatusRequest {
    #[validate(range(min = 1))]
    pub booking_id: i32,
    /// PENDING, CONFIRMED, CHECKIN, CHECKOUT or CANCELED
    pub status: String,
}

/// Request for a price and availability preview
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuoteBookingRequest {
    #[validate(length(min = 1))]
    pub room_ids: Vec<i32>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl From<QuoteBookingRequest> for QuoteRequest {
    fn from(r: QuoteBookingRequest) -> Self {
        Self {
            room_ids: r.room_ids,
            start_date: r.start_date,
            end_date: r.end_date,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDto {
    pub available: bool,
    pub conflicting_room_id: Option<i32>,
    /// Fractional nights: hours of stay / 24
    pub nights: f64,
    pub total_price: f64,
}

impl From<Quote> for QuoteDto {
    fn from(q: Quote) -> Self {
        Self {
            available: q.available,
            conflicting_room_id: q.conflicting_room_id,
            nights: q.nights,
            total_price: q.total_price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepositDto {
    pub id: i32,
    pub amount: f64,
    pub proof_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Deposit> for DepositDto {
    fn from(d: Deposit) -> Self {
        Self {
            id: d.id,
            amount: d.amount,
            proof_url: d.proof_url,
            created_at: d.created_at,
        }
    }
}

/// Booking with its rooms, deposit and property
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub id: i32,
    pub user_id: i32,
    pub property_id: i32,
    pub room_ids: Vec<i32>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: String,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub deposit: Option<DepositDto>,
    pub rooms: Vec<RoomDto>,
    pub property: PropertySummaryDto,
}

impl From<BookingDetails> for BookingDto {
    fn from(d: BookingDetails) -> Self {
        let b = d.booking;
        Self {
            id: b.id,
            user_id: b.user_id,
            property_id: b.property_id,
            room_ids: b.room_ids,
            start_date: b.start_date,
            end_date: b.end_date,
            status: b.status.as_str().to_string(),
            total_price: b.total_price,
            created_at: b.created_at,
            deposit: b.deposit.map(DepositDto::from),
            rooms: d.rooms.into_iter().map(RoomDto::from).collect(),
            property: PropertySummaryDto::from(d.property),
        }
    }
}
