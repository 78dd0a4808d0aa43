//! Booking HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::application::BookingService;
use crate::interfaces::http::common::{error_response, ApiResponse, ApiResult, ValidatedJson};

use super::dto::*;

/// Application state for booking handlers.
#[derive(Clone)]
pub struct BookingAppState {
    pub bookings: Arc<BookingService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 200, description = "Booking admitted", body = ApiResponse<BookingDto>),
        (status = 400, description = "Invalid request, price mismatch"),
        (status = 404, description = "Room or property not found"),
        (status = 409, description = "Room already booked within this time frame"),
        (status = 500, description = "Room or property not available, store failure")
    )
)]
pub async fn create_booking(
    State(state): State<BookingAppState>,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> ApiResult<BookingDto> {
    state
        .bookings
        .create_booking(request.into())
        .await
        .map(|details| Json(ApiResponse::success(BookingDto::from(details))))
        .map_err(error_response)
}

#[utoipa::path(
    patch,
    path = "/api/v1/bookings",
    tag = "Bookings",
    request_body = UpdateBookingStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<BookingDto>),
        (status = 400, description = "Invalid status or outside check-in window"),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Reactivation would overlap another booking")
    )
)]
pub async fn update_booking_status(
    State(state): State<BookingAppState>,
    ValidatedJson(request): ValidatedJson<UpdateBookingStatusRequest>,
) -> ApiResult<BookingDto> {
    state
        .bookings
        .update_status(request.booking_id, &request.status)
        .await
        .map(|details| Json(ApiResponse::success(BookingDto::from(details))))
        .map_err(error_response)
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings/quote",
    tag = "Bookings",
    request_body = QuoteBookingRequest,
    responses(
        (status = 200, description = "Availability and price preview", body = ApiResponse<QuoteDto>),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Room not found")
    )
)]
pub async fn quote_booking(
    State(state): State<BookingAppState>,
    ValidatedJson(request): ValidatedJson<QuoteBookingRequest>,
) -> ApiResult<QuoteDto> {
    state
        .bookings
        .quote(request.into())
        .await
        .map(|quote| Json(ApiResponse::success(QuoteDto::from(quote))))
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{booking_id}",
    tag = "Bookings",
    params(("booking_id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = ApiResponse<BookingDto>),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<BookingAppState>,
    Path(booking_id): Path<i32>,
) -> ApiResult<BookingDto> {
    state
        .bookings
        .get_booking(booking_id)
        .await
        .map(|details| Json(ApiResponse::success(BookingDto::from(details))))
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/user/{user_id}",
    tag = "Bookings",
    params(("user_id" = i32, Path, description = "Guest user ID")),
    responses(
        (status = 200, description = "Bookings of the user, newest first", body = ApiResponse<Vec<BookingDto>>)
    )
)]
pub async fn list_user_bookings(
    State(state): State<BookingAppState>,
    Path(user_id): Path<i32>,
) -> ApiResult<Vec<BookingDto>> {
    state
        .bookings
        .bookings_for_user(user_id)
        .await
        .map(|list| Json(ApiResponse::success(list.into_iter().map(BookingDto::from).collect())))
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/agent/{agent_id}",
    tag = "Bookings",
    params(("agent_id" = i32, Path, description = "Agent ID")),
    responses(
        (status = 200, description = "Bookings across the agent's properties", body = ApiResponse<Vec<BookingDto>>),
        (status = 404, description = "Agent has no properties")
    )
)]
pub async fn list_agent_bookings(
    State(state): State<BookingAppState>,
    Path(agent_id): Path<i32>,
) -> ApiResult<Vec<BookingDto>> {
    state
        .bookings
        .bookings_for_agent(agent_id)
        .await
        .map(|list| Json(ApiResponse::success(list.into_iter().map(BookingDto::from).collect())))
        .map_err(error_response)
}
