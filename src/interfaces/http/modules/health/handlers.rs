//! Health check handler
//!
//! Pings the store and reports how many bookings currently hold rooms, so a
//! load balancer check also catches a schema the service cannot read.

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::BookingStatus;
use crate::infrastructure::database::repositories::RepositoryContext;

#[derive(Clone)]
pub struct HealthState {
    pub db: DatabaseConnection,
    pub started_at: Arc<Instant>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// "ok" or "degraded"
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: ComponentHealth,
    /// Absent when the booking table could not be read
    pub bookings: Option<BookingStats>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComponentHealth {
    pub status: String,
    pub latency_ms: Option<u64>,
}

/// Booking counts by lifecycle stage
#[derive(Debug, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingStats {
    /// PENDING, CONFIRMED or CHECKIN: bookings holding their rooms
    pub open: u64,
    pub pending: u64,
    pub checked_in: u64,
}

impl BookingStats {
    fn from_counts(counts: &[(BookingStatus, u64)]) -> Self {
        counts
            .iter()
            .fold(Self::default(), |mut stats, &(status, total)| {
                if status.is_occupying() {
                    stats.open += total;
                }
                match status {
                    BookingStatus::Pending => stats.pending += total,
                    BookingStatus::CheckIn => stats.checked_in += total,
                    _ => {}
                }
                stats
            })
    }
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is degraded", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let db_start = Instant::now();
    let ping = state
        .db
        .execute(Statement::from_string(
            state.db.get_database_backend(),
            "SELECT 1".to_string(),
        ))
        .await;
    let database = match ping {
        Ok(_) => ComponentHealth {
            status: "ok".to_string(),
            latency_ms: Some(db_start.elapsed().as_millis() as u64),
        },
        Err(e) => {
            tracing::warn!(error = %e, "Health check database ping failed");
            ComponentHealth {
                status: "error".to_string(),
                latency_ms: None,
            }
        }
    };

    let bookings = match RepositoryContext::new(&state.db)
        .bookings()
        .count_by_status()
        .await
    {
        Ok(counts) => Some(BookingStats::from_counts(&counts)),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not count bookings");
            None
        }
    };

    let healthy = database.status == "ok" && bookings.is_some();
    let http_status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        http_status,
        Json(HealthResponse {
            status: if healthy { "ok" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: state.started_at.elapsed().as_secs(),
            database,
            bookings,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_split_open_bookings_by_stage() {
        let stats = BookingStats::from_counts(&[
            (BookingStatus::Pending, 2),
            (BookingStatus::Confirmed, 5),
            (BookingStatus::CheckIn, 1),
            (BookingStatus::Canceled, 9),
            (BookingStatus::CheckOut, 4),
        ]);
        assert_eq!(stats.open, 8);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.checked_in, 1);
    }

    #[test]
    fn no_bookings_means_zero_counts() {
        let stats = BookingStats::from_counts(&[]);
        assert_eq!(stats.open, 0);
        assert_eq!(stats.pending, 0);
    }
}
