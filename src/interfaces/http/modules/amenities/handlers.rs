//! Amenity HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::application::CatalogService;
use crate::interfaces::http::common::{error_response, ApiResponse, ApiResult, ValidatedJson};

use super::dto::*;

#[derive(Clone)]
pub struct AmenityAppState {
    pub catalog: Arc<CatalogService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/amenities",
    tag = "Amenities",
    request_body = CreateAmenityRequest,
    responses(
        (status = 200, description = "Amenity created", body = ApiResponse<AmenityDto>),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_amenity(
    State(state): State<AmenityAppState>,
    ValidatedJson(request): ValidatedJson<CreateAmenityRequest>,
) -> ApiResult<AmenityDto> {
    state
        .catalog
        .create_amenity(request.name, request.kind)
        .await
        .map(|a| Json(ApiResponse::success(AmenityDto::from(a))))
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/api/v1/amenities",
    tag = "Amenities",
    responses(
        (status = 200, description = "Non-deleted amenities", body = ApiResponse<Vec<AmenityDto>>)
    )
)]
pub async fn list_amenities(State(state): State<AmenityAppState>) -> ApiResult<Vec<AmenityDto>> {
    state
        .catalog
        .list_amenities()
        .await
        .map(|list| Json(ApiResponse::success(amenity_dtos(list))))
        .map_err(error_response)
}

#[utoipa::path(
    delete,
    path = "/api/v1/amenities/{amenity_id}",
    tag = "Amenities",
    params(("amenity_id" = i32, Path, description = "Amenity ID")),
    responses(
        (status = 200, description = "Amenity hidden from listings", body = ApiResponse<AmenityDto>),
        (status = 404, description = "Amenity not found")
    )
)]
pub async fn delete_amenity(
    State(state): State<AmenityAppState>,
    Path(amenity_id): Path<i32>,
) -> ApiResult<AmenityDto> {
    state
        .catalog
        .delete_amenity(amenity_id)
        .await
        .map(|a| Json(ApiResponse::success(AmenityDto::from(a))))
        .map_err(error_response)
}
