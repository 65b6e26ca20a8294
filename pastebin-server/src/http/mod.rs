//! HTTP server layer
//!
//! Axum server with:
//! - Permissive CORS on every response
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use extractors::LenientJson;
pub use server::{build_router, run_server, App, AppState, ServerConfig, ServerError};
