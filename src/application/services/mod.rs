pub mod availability;
pub mod booking;
pub mod catalog;

pub use availability::{check_available, check_room, Availability};
pub use booking::{BookingRequest, BookingService, Quote, QuoteRequest};
pub use catalog::{
    CatalogService, PropertyRequest, PropertyWithRooms, RoomRequest, RoomWithAmenities,
};

use sea_orm::DatabaseTransaction;
use tracing::warn;

use crate::domain::DomainResult;

/// Commit on success, roll back on failure.
///
/// A failed rollback is logged and the original error is returned; the
/// connection drops the transaction either way.
pub(crate) async fn finish<T>(txn: DatabaseTransaction, result: DomainResult<T>) -> DomainResult<T> {
    match result {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "Transaction rollback failed");
            }
            Err(e)
        }
    }
}
