//! Domain service for creating and editing posts.

use thiserror::Error;

use crate::domain::{PostId, Principal};
use crate::models::Post;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Covers both a missing post and one owned by another user.
    #[error("Post not found or unauthorized user")]
    NotFoundOrUnauthorized,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for PostError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for PostError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for post operations.
///
/// Mutating operations take an already authenticated [`Principal`]; token
/// handling lives in [`AuthService`](crate::services::AuthService).
#[async_trait::async_trait]
pub trait PostService: Send + Sync {
    /// # Errors
    ///
    /// Returns [`PostError::InvalidInput`] if `content` is empty.
    async fn create_post(&self, author: &Principal, content: &str) -> Result<Post, PostError>;

    /// Replaces the content of a post owned by `author`.
    ///
    /// # Errors
    ///
    /// Returns [`PostError::NotFoundOrUnauthorized`] if the post is missing or
    /// belongs to someone else.
    async fn update_post(
        &self,
        author: &Principal,
        post_id: PostId,
        content: &str,
    ) -> Result<Post, PostError>;

    async fn get_post(&self, post_id: PostId) -> Result<Option<Post>, PostError>;
}
