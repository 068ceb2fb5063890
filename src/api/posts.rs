use axum::{
    Extension, Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::validation::validate_post_id;
use super::{
    ApiError, ApiResponse, AppState, MessageResponse, PostContentRequest, PostCreatedResponse,
    PostDto,
};
use crate::domain::Principal;

/// POST /posts
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<PostContentRequest>,
) -> Result<Json<ApiResponse<PostCreatedResponse>>, ApiError> {
    let post = state
        .post_service
        .create_post(&principal, &payload.content)
        .await?;

    Ok(Json(ApiResponse::success(PostCreatedResponse {
        message: "Post created successfully.".to_string(),
        post_id: post.id,
    })))
}

/// PUT /posts/{id}
/// Only the author may edit; anything else is reported as not found
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i32>,
    Json(payload): Json<PostContentRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let post_id = validate_post_id(id)?;

    state
        .post_service
        .update_post(&principal, post_id, &payload.content)
        .await?;

    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Post updated successfully.".to_string(),
    })))
}

/// GET /posts/{id}
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<PostDto>>, ApiError> {
    let post_id = validate_post_id(id)?;

    let post = state
        .post_service
        .get_post(post_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post", post_id))?;

    Ok(Json(ApiResponse::success(PostDto::from(post))))
}
