//! Room HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::application::CatalogService;
use crate::interfaces::http::common::{error_response, ApiResponse, ApiResult, ValidatedJson};
use crate::interfaces::http::modules::properties::UpdateStatusRequest;

use super::dto::*;

/// Application state for room handlers.
#[derive(Clone)]
pub struct RoomAppState {
    pub catalog: Arc<CatalogService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/rooms",
    tag = "Rooms",
    request_body = CreateRoomRequest,
    responses(
        (status = 200, description = "Room created", body = ApiResponse<RoomDto>),
        (status = 400, description = "Invalid request or deleted property"),
        (status = 404, description = "Property or amenity not found")
    )
)]
pub async fn create_room(
    State(state): State<RoomAppState>,
    ValidatedJson(request): ValidatedJson<CreateRoomRequest>,
) -> ApiResult<RoomDto> {
    state
        .catalog
        .create_room(request.into())
        .await
        .map(|r| Json(ApiResponse::success(RoomDto::from(r))))
        .map_err(error_response)
}

#[utoipa::path(
    patch,
    path = "/api/v1/rooms/{room_id}",
    tag = "Rooms",
    params(("room_id" = i32, Path, description = "Room ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<RoomDto>),
        (status = 400, description = "Invalid status"),
        (status = 404, description = "Room not found")
    )
)]
pub async fn update_room_status(
    State(state): State<RoomAppState>,
    Path(room_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateStatusRequest>,
) -> ApiResult<RoomDto> {
    state
        .catalog
        .set_room_status(room_id, &request.status)
        .await
        .map(|r| Json(ApiResponse::success(RoomDto::from(r))))
        .map_err(error_response)
}

#[utoipa::path(
    delete,
    path = "/api/v1/rooms/{room_id}",
    tag = "Rooms",
    params(("room_id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room marked DELETED", body = ApiResponse<RoomDto>),
        (status = 404, description = "Room not found")
    )
)]
pub async fn delete_room(
    State(state): State<RoomAppState>,
    Path(room_id): Path<i32>,
) -> ApiResult<RoomDto> {
    state
        .catalog
        .delete_room(room_id)
        .await
        .map(|r| Json(ApiResponse::success(RoomDto::from(r))))
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms/property/{property_id}",
    tag = "Rooms",
    params(("property_id" = i32, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Non-deleted rooms of the property", body = ApiResponse<Vec<RoomWithAmenitiesDto>>),
        (status = 404, description = "Property not found")
    )
)]
pub async fn list_property_rooms(
    State(state): State<RoomAppState>,
    Path(property_id): Path<i32>,
) -> ApiResult<Vec<RoomWithAmenitiesDto>> {
    state
        .catalog
        .rooms_for_property(property_id)
        .await
        .map(|list| {
            Json(ApiResponse::success(
                list.into_iter().map(RoomWithAmenitiesDto::from).collect(),
            ))
        })
        .map_err(error_response)
}
