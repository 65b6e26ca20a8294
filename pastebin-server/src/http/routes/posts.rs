//! Post endpoints
//!
//! Delete and edit answer with a fixed confirmation string whether or not
//! a row matched. Get answers `null` for an unknown id.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::db::repos::PostRepo;
use crate::http::error::ApiError;
use crate::http::extractors::LenientJson;
use crate::http::server::AppState;
use crate::models::{CommandOutcome, LooseText, Post};

pub const POST_DELETED: &str = "post was deleted";
pub const POST_EDITED: &str = "post was edited";

/// Create post request
#[derive(Debug, Default, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: LooseText,
    #[serde(default)]
    pub description: LooseText,
}

/// Edit post request
#[derive(Debug, Default, Deserialize)]
pub struct EditPostRequest {
    #[serde(default)]
    pub description: LooseText,
}

/// GET / - every post, unordered
async fn list_posts(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Post>>, ApiError> {
    let posts = PostRepo::new(&state.pool).list_all().await?;
    Ok(Json(posts))
}

/// POST /input - insert a post, answer with the insert result
async fn create_post(
    State(state): State<Arc<AppState>>,
    LenientJson(req): LenientJson<CreatePostRequest>,
) -> Result<Json<CommandOutcome>, ApiError> {
    let inserted = PostRepo::new(&state.pool)
        .create(req.title.as_deref(), req.description.as_deref())
        .await?;

    tracing::debug!(rows = inserted, "post created");
    Ok(Json(CommandOutcome::insert(inserted)))
}

/// GET /viewpost - every post, newest first
async fn list_recent_posts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Post>>, ApiError> {
    let posts = PostRepo::new(&state.pool).list_recent().await?;
    Ok(Json(posts))
}

/// GET /post/{id} - one post or null
async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Option<Post>>, ApiError> {
    let post = PostRepo::new(&state.pool).get(&id).await?;
    Ok(Json(post))
}

/// DELETE /post/{id}
async fn delete_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<&'static str>, ApiError> {
    let deleted = PostRepo::new(&state.pool).delete(&id).await?;

    tracing::debug!(post_id = %id, rows = deleted, "post deleted");
    Ok(Json(POST_DELETED))
}

/// PUT /post/{id} - replace the description
async fn edit_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    LenientJson(req): LenientJson<EditPostRequest>,
) -> Result<Json<&'static str>, ApiError> {
    let edited = PostRepo::new(&state.pool)
        .update_description(&id, req.description.as_deref())
        .await?;

    tracing::debug!(post_id = %id, rows = edited, "post edited");
    Ok(Json(POST_EDITED))
}

/// Post routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_posts))
        .route("/input", post(create_post))
        .route("/viewpost", get(list_recent_posts))
        .route(
            "/post/{id}",
            get(get_post).delete(delete_post).put(edit_post),
        )
}
