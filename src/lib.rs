//! # Stay Booking
//!
//! Property-booking backend: agents list properties and rooms, guests book
//! rooms for date ranges, deposits and status transitions are tracked.
//!
//! ## Architecture
//!
//! - **domain**: entities, status machines, interval and pricing arithmetic
//! - **application**: admission, status updates, quotes, catalog maintenance
//! - **infrastructure**: SeaORM entities, migrations and repositories
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: errors, clock, graceful shutdown
//!
//! Every booking-affecting operation runs on a single database
//! transaction; the overlap check and the insert share it.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig};

pub use interfaces::http::create_api_router;
