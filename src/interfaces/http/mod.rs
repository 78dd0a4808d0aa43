//! HTTP REST API interfaces
//!
//! - `common`: response envelope, validated JSON extractor, error mapping
//! - `modules`: per-resource DTOs and handlers, health, metrics, request id
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc, ApiServices};
