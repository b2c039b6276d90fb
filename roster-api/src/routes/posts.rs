/// Remote post endpoints
///
/// Thin pass-through to the injected `PostSource`. Nothing is cached or
/// stored; each request makes one outbound call.
///
/// # Endpoints
///
/// - `GET /v1/posts` - The whole remote collection as display rows
/// - `GET /v1/posts/:id` - One remote post

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Json,
};
use roster_shared::listing::PostRow;
use roster_shared::remote::{Post, TransportError};
use serde::Serialize;

/// Post list response
#[derive(Debug, Serialize)]
pub struct ListPostsResponse {
    pub posts: Vec<PostRow>,
    pub count: usize,
}

/// List remote posts
///
/// # Errors
///
/// - 503 when the remote host is unreachable
/// - 504 when it does not answer in time
/// - 502 on any other status or an unreadable body
pub async fn list_posts(State(state): State<AppState>) -> ApiResult<Json<ListPostsResponse>> {
    let posts = state.posts.list_posts().await.map_err(|e| {
        tracing::warn!(error = %e, "Fetching posts failed");
        e
    })?;

    Ok(Json(ListPostsResponse {
        count: posts.len(),
        posts: posts.iter().map(PostRow::from).collect(),
    }))
}

/// Get one remote post
///
/// A 404 for this post is passed through as 404. Other failures map as in
/// `list_posts`.
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Post>> {
    let post = state.posts.get_post(id).await.map_err(|e| match e {
        TransportError::Status(404) => ApiError::NotFound(format!("Post {} not found", id)),
        e => {
            tracing::warn!(id, error = %e, "Fetching post failed");
            e.into()
        }
    })?;

    Ok(Json(post))
}
