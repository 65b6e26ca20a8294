//! pastebin-server: HTTP CRUD service over the `pastebin` posts table
//!
//! Six JSON routes, each issuing one parameterized statement over a
//! single shared PostgreSQL connection. Permissive CORS on every response.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{ConfigError, ConnectionTarget, Settings};
pub use http::{build_router, run_server, ApiError, App, AppState, ServerConfig};
