//! Post repository
//!
//! One statement per method. The path id is bound as text and cast by the
//! database, so a non-numeric id surfaces as a database error.

use sqlx::PgPool;

use super::DbError;
use crate::models::Post;

/// Post repository
pub struct PostRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PostRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All posts, in whatever order the database returns them.
    pub async fn list_all(&self) -> Result<Vec<Post>, DbError> {
        let posts = sqlx::query_as::<_, Post>(
            "SELECT post_id, post_title, post_description FROM pastebin",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(posts)
    }

    /// All posts, newest (highest id) first.
    pub async fn list_recent(&self) -> Result<Vec<Post>, DbError> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT post_id, post_title, post_description
            FROM pastebin
            ORDER BY post_id DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(posts)
    }

    /// First post matching `id`, if any.
    pub async fn get(&self, id: &str) -> Result<Option<Post>, DbError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT post_id, post_title, post_description
            FROM pastebin
            WHERE post_id = CAST($1 AS INTEGER)
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(post)
    }

    /// Insert a post. Returns the number of rows inserted.
    pub async fn create(
        &self,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<u64, DbError> {
        let result = sqlx::query(
            "INSERT INTO pastebin (post_description, post_title) VALUES ($1, $2)",
        )
        .bind(description)
        .bind(title)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete by id (idempotent). Returns the number of rows removed.
    pub async fn delete(&self, id: &str) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM pastebin WHERE post_id = CAST($1 AS INTEGER)")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Replace the description of one post. Title and id are untouched.
    pub async fn update_description(
        &self,
        id: &str,
        description: Option<&str>,
    ) -> Result<u64, DbError> {
        let result = sqlx::query(
            "UPDATE pastebin SET post_description = $1 WHERE post_id = CAST($2 AS INTEGER)",
        )
        .bind(description)
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
