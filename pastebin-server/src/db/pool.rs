//! Shared connection management
//!
//! A sqlx pool capped at a single connection. Every handler goes through
//! it, so statements from concurrent requests queue on that connection.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// Connections held open for the whole process.
pub const SHARED_CONNECTIONS: u32 = 1;

fn shared() -> PgPoolOptions {
    PgPoolOptions::new().max_connections(SHARED_CONNECTIONS)
}

/// Open the shared connection.
///
/// # Errors
///
/// Returns an error if the database cannot be reached.
pub async fn create_pool(options: PgConnectOptions) -> Result<PgPool, sqlx::Error> {
    shared()
        .min_connections(SHARED_CONNECTIONS)
        .connect_with(options)
        .await
}

/// Set up the shared connection without dialing it.
///
/// The first statement connects. Acquiring waits at most `acquire_timeout`.
pub fn create_lazy_pool(options: PgConnectOptions, acquire_timeout: Duration) -> PgPool {
    shared()
        .acquire_timeout(acquire_timeout)
        .connect_lazy_with(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[tokio::test]
    async fn lazy_pool_does_not_connect() {
        let pool = create_lazy_pool(test_support::unreachable(), Duration::from_millis(200));
        assert_eq!(pool.size(), 0);
        assert!(sqlx::query("SELECT 1").execute(&pool).await.is_err());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn concurrent_statements_share_one_connection() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let options: PgConnectOptions = url.parse().expect("invalid DATABASE_URL");
        let pool = create_pool(options).await.expect("connection failed");

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    let result: (i32,) = sqlx::query_as("SELECT $1::int")
                        .bind(i)
                        .fetch_one(&pool)
                        .await
                        .expect("concurrent query failed");
                    result.0
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.expect("task panicked");
            assert_eq!(result, i as i32);
        }

        assert_eq!(pool.size(), SHARED_CONNECTIONS);
    }
}
