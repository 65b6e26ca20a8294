//! Database layer - the shared connection and the posts repository
//!
//! - One connection for the whole process, opened at startup
//! - One parameterized statement per operation, no transactions
//! - Schema is owned by the database, not created here

pub mod pool;
pub mod repos;

pub use pool::{create_lazy_pool, create_pool};
pub use repos::*;
