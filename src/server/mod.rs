//! Axum-based HTTP server for menuscan.
//!
//! # Components
//!
//! - `handlers`: analyze, sample, health and metrics endpoints.
//! - `middleware`: request ID tracking and bearer-token authentication.
//! - `routes`: the router tying everything together.
//! - `upload`: multipart storage of menu photos.

mod handlers;
mod middleware;
mod routes;
pub mod upload;

pub use handlers::{HealthResponse, HealthStatus};
pub use routes::{create_router, Analyzer, AppState};
