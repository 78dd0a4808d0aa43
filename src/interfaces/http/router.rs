//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{BookingService, CatalogService};
use crate::interfaces::http::common::ApiResponse;

use super::modules::{amenities, bookings, health, metrics, properties, request_id, rooms};

/// Everything the router needs from the running service
#[derive(Clone)]
pub struct ApiServices {
    pub db: DatabaseConnection,
    pub bookings: Arc<BookingService>,
    pub catalog: Arc<CatalogService>,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Bookings
        bookings::create_booking,
        bookings::update_booking_status,
        bookings::quote_booking,
        bookings::get_booking,
        bookings::list_user_bookings,
        bookings::list_agent_bookings,
        // Properties
        properties::create_property,
        properties::update_property_status,
        properties::delete_property,
        properties::list_agent_properties,
        // Rooms
        rooms::create_room,
        rooms::update_room_status,
        rooms::delete_room,
        rooms::list_property_rooms,
        // Amenities
        amenities::create_amenity,
        amenities::list_amenities,
        amenities::delete_amenity,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            health::ComponentHealth,
            health::BookingStats,
            bookings::CreateBookingRequest,
            bookings::DepositRequest,
            bookings::UpdateBookingStatusRequest,
            bookings::QuoteBookingRequest,
            bookings::QuoteDto,
            bookings::DepositDto,
            bookings::BookingDto,
            properties::CreatePropertyRequest,
            properties::UpdateStatusRequest,
            properties::PropertyDto,
            properties::PropertySummaryDto,
            properties::PropertyWithRoomsDto,
            rooms::CreateRoomRequest,
            rooms::RoomDto,
            rooms::RoomWithAmenitiesDto,
            amenities::CreateAmenityRequest,
            amenities::AmenityDto,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Bookings", description = "Booking admission, status lifecycle and lookups"),
        (name = "Properties", description = "Property data entry"),
        (name = "Rooms", description = "Room data entry"),
        (name = "Amenities", description = "Amenity tags for properties and rooms"),
    ),
    info(
        title = "Stay Booking API",
        version = "1.0.0",
        description = "Admission and pricing engine for property bookings",
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(services: ApiServices, prometheus_handle: PrometheusHandle) -> Router {
    let booking_routes = Router::new()
        .route(
            "/",
            post(bookings::create_booking).patch(bookings::update_booking_status),
        )
        .route("/quote", post(bookings::quote_booking))
        .route("/{booking_id}", get(bookings::get_booking))
        .route("/user/{user_id}", get(bookings::list_user_bookings))
        .route("/agent/{agent_id}", get(bookings::list_agent_bookings))
        .with_state(bookings::BookingAppState {
            bookings: services.bookings.clone(),
        });

    let property_routes = Router::new()
        .route("/", post(properties::create_property))
        .route(
            "/{property_id}",
            patch(properties::update_property_status).delete(properties::delete_property),
        )
        .route("/agent/{agent_id}", get(properties::list_agent_properties))
        .with_state(properties::PropertyAppState {
            catalog: services.catalog.clone(),
        });

    let room_routes = Router::new()
        .route("/", post(rooms::create_room))
        .route(
            "/{room_id}",
            patch(rooms::update_room_status).delete(rooms::delete_room),
        )
        .route("/property/{property_id}", get(rooms::list_property_rooms))
        .with_state(rooms::RoomAppState {
            catalog: services.catalog.clone(),
        });

    let amenity_routes = Router::new()
        .route(
            "/",
            post(amenities::create_amenity).get(amenities::list_amenities),
        )
        .route("/{amenity_id}", delete(amenities::delete_amenity))
        .with_state(amenities::AmenityAppState {
            catalog: services.catalog.clone(),
        });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db: services.db.clone(),
            started_at: Arc::new(Instant::now()),
        });

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::prometheus_metrics))
        .with_state(metrics::MetricsState {
            handle: prometheus_handle,
        });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .nest("/api/v1/bookings", booking_routes)
        .nest("/api/v1/properties", property_routes)
        .nest("/api/v1/rooms", room_routes)
        .nest("/api/v1/amenities", amenity_routes)
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(middleware::from_fn(request_id::request_id_middleware))
}
