//! Shared fixtures for tests

use std::sync::OnceLock;

use sqlx::postgres::{PgConnectOptions, PgSslMode};
use sqlx::PgPool;
use tokio::sync::{Mutex, MutexGuard};

use crate::db::create_pool;

/// Options pointing at a port nothing listens on.
pub(crate) fn unreachable() -> PgConnectOptions {
    PgConnectOptions::new()
        .host("127.0.0.1")
        .port(1)
        .username("nobody")
        .database("nowhere")
        .ssl_mode(PgSslMode::Disable)
}

/// Tests against the real table run one at a time: several of them assert
/// on "the newest post".
fn table_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// Connect to `DATABASE_URL` and make sure the `pastebin` table exists.
pub(crate) async fn database() -> (PgPool, MutexGuard<'static, ()>) {
    let guard = table_lock().lock().await;

    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let options: PgConnectOptions = url.parse().expect("invalid DATABASE_URL");
    let pool = create_pool(options).await.expect("connection failed");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pastebin (
            post_id SERIAL PRIMARY KEY,
            post_title TEXT,
            post_description TEXT
        )
        "#,
    )
    .execute(&pool)
    .await
    .expect("fixture table");

    (pool, guard)
}
