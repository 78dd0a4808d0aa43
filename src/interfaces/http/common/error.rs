//! Domain error to HTTP status mapping

use axum::http::StatusCode;
use axum::Json;
use tracing::error;

use crate::domain::DomainError;

use super::ApiResponse;

pub type ApiError<T> = (StatusCode, Json<ApiResponse<T>>);

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError<T>>;

pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_)
        | DomainError::InvalidStatus(_)
        | DomainError::PriceMismatch { .. }
        | DomainError::CheckInClosed { .. } => StatusCode::BAD_REQUEST,
        DomainError::RoomConflict { .. } => StatusCode::CONFLICT,
        // Unbookable room/property surfaces as a server error
        DomainError::Unavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Database(_) | DomainError::Corrupted(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert a domain error into the `(status, envelope)` pair handlers return.
///
/// Store failures are logged and replaced by a generic message.
pub fn error_response<T>(err: DomainError) -> ApiError<T> {
    let status = status_for(&err);
    let message = match &err {
        DomainError::Database(_) | DomainError::Corrupted(_) => {
            error!(error = %err, "Request failed on the store");
            "Internal server error".to_string()
        }
        _ => err.to_string(),
    };
    (status, Json(ApiResponse::error(message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_expected_statuses() {
        assert_eq!(
            status_for(&DomainError::not_found("Booking", 1)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&DomainError::InvalidStatus("FOO".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&DomainError::PriceMismatch {
                declared: 150.0,
                computed: 200.0
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&DomainError::RoomConflict { room_id: 3 }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&DomainError::Unavailable {
                entity: "Room",
                id: 3,
                status: "NOTAVAILABLE".into()
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_errors_are_masked() {
        let (status, Json(body)) =
            error_response::<()>(DomainError::Database(sea_orm::DbErr::Custom("disk".into())));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.as_deref(), Some("Internal server error"));
    }

    #[test]
    fn client_errors_keep_their_message() {
        let (_, Json(body)) = error_response::<()>(DomainError::RoomConflict { room_id: 3 });
        assert_eq!(
            body.error.as_deref(),
            Some("Room 3 already booked within this time frame")
        );
    }
}
