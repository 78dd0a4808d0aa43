//! REST surface driven through the real router with `tower::ServiceExt`.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::*;
use stay_booking::application::{BookingService, CatalogService};
use stay_booking::create_api_router;
use stay_booking::interfaces::http::ApiServices;

async fn app() -> Router {
    let db = setup_db().await;
    let services = ApiServices {
        db: db.clone(),
        bookings: Arc::new(BookingService::new(db.clone(), clock(at(1, 0)))),
        catalog: Arc::new(CatalogService::new(db, clock(at(1, 0)), 0)),
    };
    let handle = PrometheusBuilder::new().build_recorder().handle();
    create_api_router(services, handle)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Creates a property with one room at `price` and returns `(property_id, room_id)`.
async fn seed(app: &Router, price: i64) -> (i64, i64) {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/properties",
        Some(json!({
            "agentId": AGENT,
            "name": "Harbour View",
            "address": "2 Quay St",
            "type": "HOTEL",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let property_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/rooms",
        Some(json!({ "propertyId": property_id, "name": "Double", "price": price })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    (property_id, body["data"]["id"].as_i64().unwrap())
}

fn booking(property_id: i64, room_id: i64, start: &str, end: &str) -> Value {
    json!({
        "userId": GUEST,
        "propertyId": property_id,
        "roomIds": [room_id],
        "startDate": start,
        "endDate": end,
    })
}

#[tokio::test]
async fn create_booking_returns_camel_case_envelope() {
    let app = app().await;
    let (property_id, room_id) = seed(&app, 100).await;

    let mut body = booking(
        property_id,
        room_id,
        "2024-01-01T00:00:00Z",
        "2024-01-03T00:00:00Z",
    );
    body["totalPrice"] = json!(200.0);
    let (status, body) = send(&app, Method::POST, "/api/v1/bookings", Some(body)).await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["success"], json!(true));
    let data = &body["data"];
    assert_eq!(data["status"], json!("CONFIRMED"));
    assert_eq!(data["totalPrice"], json!(200.0));
    assert_eq!(data["roomIds"], json!([room_id]));
    assert_eq!(data["property"]["id"], json!(property_id));
    assert_eq!(data["rooms"][0]["price"], json!(100));
    assert!(data["deposit"].is_null());

    let id = data["id"].as_i64().unwrap();
    let (status, fetched) = send(&app, Method::GET, &format!("/api/v1/bookings/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["id"], json!(id));
}

#[tokio::test]
async fn deposit_makes_booking_pending() {
    let app = app().await;
    let (property_id, room_id) = seed(&app, 100).await;

    let mut body = booking(
        property_id,
        room_id,
        "2024-01-01T00:00:00Z",
        "2024-01-02T00:00:00Z",
    );
    body["deposit"] = json!({ "amount": 30.0, "proofUrl": "https://files.example/p.png" });
    let (status, body) = send(&app, Method::POST, "/api/v1/bookings", Some(body)).await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], json!("PENDING"));
    assert_eq!(body["data"]["deposit"]["amount"], json!(30.0));
}

#[tokio::test]
async fn overlapping_booking_is_a_conflict() {
    let app = app().await;
    let (property_id, room_id) = seed(&app, 100).await;

    let first = booking(
        property_id,
        room_id,
        "2024-01-01T00:00:00Z",
        "2024-01-05T00:00:00Z",
    );
    let (status, _) = send(&app, Method::POST, "/api/v1/bookings", Some(first)).await;
    assert_eq!(status, StatusCode::OK);

    let second = booking(
        property_id,
        room_id,
        "2024-01-04T00:00:00Z",
        "2024-01-06T00:00:00Z",
    );
    let (status, body) = send(&app, Method::POST, "/api/v1/bookings", Some(second)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("already booked"));
}

#[tokio::test]
async fn price_mismatch_is_bad_request() {
    let app = app().await;
    let (property_id, room_id) = seed(&app, 100).await;

    let mut body = booking(
        property_id,
        room_id,
        "2024-01-01T00:00:00Z",
        "2024-01-03T00:00:00Z",
    );
    body["totalPrice"] = json!(150.0);
    let (status, _) = send(&app, Method::POST, "/api/v1/bookings", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, list) = send(
        &app,
        Method::GET,
        &format!("/api/v1/bookings/user/{GUEST}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["data"], json!([]));
}

#[tokio::test]
async fn malformed_or_invalid_payloads_are_bad_request() {
    let app = app().await;
    let (property_id, _) = seed(&app, 100).await;

    let mut empty_rooms = booking(property_id, 0, "2024-01-01T00:00:00Z", "2024-01-02T00:00:00Z");
    empty_rooms["roomIds"] = json!([]);
    let (status, _) = send(&app, Method::POST, "/api/v1/bookings", Some(empty_rooms)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/bookings")
        .header("content-type", "application/json")
        .body(Body::from("{\"userId\": "))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unavailable_room_is_server_error() {
    let app = app().await;
    let (property_id, room_id) = seed(&app, 100).await;

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/rooms/{room_id}"),
        Some(json!({ "status": "NOTAVAILABLE" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let body = booking(
        property_id,
        room_id,
        "2024-01-01T00:00:00Z",
        "2024-01-02T00:00:00Z",
    );
    let (status, _) = send(&app, Method::POST, "/api/v1/bookings", Some(body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn status_patch_validates_value_and_target() {
    let app = app().await;
    let (property_id, room_id) = seed(&app, 100).await;
    let body = booking(
        property_id,
        room_id,
        "2024-01-01T00:00:00Z",
        "2024-01-02T00:00:00Z",
    );
    let (_, created) = send(&app, Method::POST, "/api/v1/bookings", Some(body)).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/v1/bookings",
        Some(json!({ "bookingId": id, "status": "FOO" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/v1/bookings",
        Some(json!({ "bookingId": 999, "status": "CANCELED" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, updated) = send(
        &app,
        Method::PATCH,
        "/api/v1/bookings",
        Some(json!({ "bookingId": id, "status": "CANCELED" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["status"], json!("CANCELED"));
}

#[tokio::test]
async fn quote_previews_price() {
    let app = app().await;
    let (_, room_id) = seed(&app, 100).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/bookings/quote",
        Some(json!({
            "roomIds": [room_id],
            "startDate": "2024-01-01T00:00:00Z",
            "endDate": "2024-01-02T12:00:00Z",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["available"], json!(true));
    assert_eq!(body["data"]["nights"], json!(1.5));
    assert_eq!(body["data"]["totalPrice"], json!(150.0));
}

#[tokio::test]
async fn lookups_report_missing_and_malformed_ids() {
    let app = app().await;

    let (status, _) = send(&app, Method::GET, "/api/v1/bookings/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/api/v1/bookings/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/api/v1/bookings/agent/4242", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleted_room_drops_out_of_agent_listing() {
    let app = app().await;
    let (property_id, room_id) = seed(&app, 100).await;

    let (status, _) = send(&app, Method::DELETE, &format!("/api/v1/rooms/{room_id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/properties/agent/{AGENT}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["property"]["id"], json!(property_id));
    assert_eq!(body["data"][0]["rooms"], json!([]));
}

#[tokio::test]
async fn agent_listing_returns_amenities_and_type() {
    let app = app().await;

    let (status, wifi) = send(
        &app,
        Method::POST,
        "/api/v1/amenities",
        Some(json!({ "name": "Wifi", "type": "GENERAL" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{wifi}");
    let wifi_id = wifi["data"]["id"].as_i64().unwrap();

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/v1/properties",
        Some(json!({
            "agentId": AGENT,
            "name": "Dune Lodge",
            "address": "9 Sand Rd",
            "type": "HOMESTAY",
            "longitude": 108.2,
            "latitude": 16.0,
            "amenityIds": [wifi_id],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{created}");
    let property_id = created["data"]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/rooms",
        Some(json!({
            "propertyId": property_id,
            "name": "Suite",
            "price": 150,
            "amenityIds": [wifi_id],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/properties/agent/{AGENT}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let entry = &body["data"][0];
    assert_eq!(entry["property"]["type"], json!("HOMESTAY"));
    assert_eq!(entry["property"]["latitude"], json!(16.0));
    assert_eq!(
        entry["amenities"],
        json!([{ "id": wifi_id, "name": "Wifi", "type": "GENERAL" }])
    );
    assert_eq!(entry["rooms"][0]["room"]["name"], json!("Suite"));
    assert_eq!(entry["rooms"][0]["amenities"][0]["id"], json!(wifi_id));
}

#[tokio::test]
async fn property_with_unknown_amenity_is_not_found() {
    let app = app().await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/properties",
        Some(json!({
            "agentId": AGENT,
            "name": "Dune Lodge",
            "address": "9 Sand Rd",
            "type": "HOMESTAY",
            "amenityIds": [404],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/properties",
        Some(json!({ "agentId": AGENT, "name": "No Type", "address": "1 A St" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reactivating_into_a_taken_room_is_a_conflict() {
    let app = app().await;
    let (property_id, room_id) = seed(&app, 100).await;

    let first = booking(
        property_id,
        room_id,
        "2024-01-01T00:00:00Z",
        "2024-01-05T00:00:00Z",
    );
    let (_, created) = send(&app, Method::POST, "/api/v1/bookings", Some(first)).await;
    let first_id = created["data"]["id"].as_i64().unwrap();
    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/v1/bookings",
        Some(json!({ "bookingId": first_id, "status": "CANCELED" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let second = booking(
        property_id,
        room_id,
        "2024-01-02T00:00:00Z",
        "2024-01-04T00:00:00Z",
    );
    let (status, _) = send(&app, Method::POST, "/api/v1/bookings", Some(second)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/v1/bookings",
        Some(json!({ "bookingId": first_id, "status": "CONFIRMED" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], json!(false));

    let (_, fetched) = send(
        &app,
        Method::GET,
        &format!("/api/v1/bookings/{first_id}"),
        None,
    )
    .await;
    assert_eq!(fetched["data"]["status"], json!("CANCELED"));
}

#[tokio::test]
async fn health_reports_ok_and_echoes_request_id() {
    let app = app().await;

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "trace-me")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "trace-me"
    );
}

#[tokio::test]
async fn health_counts_open_bookings() {
    let app = app().await;
    let (property_id, room_id) = seed(&app, 100).await;

    let mut pending = booking(
        property_id,
        room_id,
        "2024-01-01T00:00:00Z",
        "2024-01-02T00:00:00Z",
    );
    pending["deposit"] = json!({ "amount": 30.0, "proofUrl": "https://files.example/p.png" });
    let (status, _) = send(&app, Method::POST, "/api/v1/bookings", Some(pending)).await;
    assert_eq!(status, StatusCode::OK);

    let confirmed = booking(
        property_id,
        room_id,
        "2024-01-03T00:00:00Z",
        "2024-01-04T00:00:00Z",
    );
    let (_, created) = send(&app, Method::POST, "/api/v1/bookings", Some(confirmed)).await;
    let canceled_id = created["data"]["id"].as_i64().unwrap();
    send(
        &app,
        Method::PATCH,
        "/api/v1/bookings",
        Some(json!({ "bookingId": canceled_id, "status": "CANCELED" })),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["bookings"]["open"], json!(1));
    assert_eq!(body["bookings"]["pending"], json!(1));
    assert_eq!(body["bookings"]["checkedIn"], json!(0));
}
