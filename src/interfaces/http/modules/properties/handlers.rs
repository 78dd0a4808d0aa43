//! Property HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::application::CatalogService;
use crate::interfaces::http::common::{error_response, ApiResponse, ApiResult, ValidatedJson};

use super::dto::*;

/// Application state for property handlers.
#[derive(Clone)]
pub struct PropertyAppState {
    pub catalog: Arc<CatalogService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/properties",
    tag = "Properties",
    request_body = CreatePropertyRequest,
    responses(
        (status = 200, description = "Property created", body = ApiResponse<PropertyDto>),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Amenity not found")
    )
)]
pub async fn create_property(
    State(state): State<PropertyAppState>,
    ValidatedJson(request): ValidatedJson<CreatePropertyRequest>,
) -> ApiResult<PropertyDto> {
    state
        .catalog
        .create_property(request.into())
        .await
        .map(|p| Json(ApiResponse::success(PropertyDto::from(p))))
        .map_err(error_response)
}

#[utoipa::path(
    patch,
    path = "/api/v1/properties/{property_id}",
    tag = "Properties",
    params(("property_id" = i32, Path, description = "Property ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<PropertyDto>),
        (status = 400, description = "Invalid status"),
        (status = 404, description = "Property not found")
    )
)]
pub async fn update_property_status(
    State(state): State<PropertyAppState>,
    Path(property_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateStatusRequest>,
) -> ApiResult<PropertyDto> {
    state
        .catalog
        .set_property_status(property_id, &request.status)
        .await
        .map(|p| Json(ApiResponse::success(PropertyDto::from(p))))
        .map_err(error_response)
}

#[utoipa::path(
    delete,
    path = "/api/v1/properties/{property_id}",
    tag = "Properties",
    params(("property_id" = i32, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Property marked DELETED", body = ApiResponse<PropertyDto>),
        (status = 404, description = "Property not found")
    )
)]
pub async fn delete_property(
    State(state): State<PropertyAppState>,
    Path(property_id): Path<i32>,
) -> ApiResult<PropertyDto> {
    state
        .catalog
        .delete_property(property_id)
        .await
        .map(|p| Json(ApiResponse::success(PropertyDto::from(p))))
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/api/v1/properties/agent/{agent_id}",
    tag = "Properties",
    params(("agent_id" = i32, Path, description = "Agent ID")),
    responses(
        (status = 200, description = "Non-deleted properties with their amenities and rooms", body = ApiResponse<Vec<PropertyWithRoomsDto>>)
    )
)]
pub async fn list_agent_properties(
    State(state): State<PropertyAppState>,
    Path(agent_id): Path<i32>,
) -> ApiResult<Vec<PropertyWithRoomsDto>> {
    state
        .catalog
        .properties_for_agent(agent_id)
        .await
        .map(|list| {
            Json(ApiResponse::success(
                list.into_iter().map(PropertyWithRoomsDto::from).collect(),
            ))
        })
        .map_err(error_response)
}
