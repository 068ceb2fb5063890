//! `SeaORM` implementation of the `PostService` trait.

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::db::Store;
use crate::domain::{PostId, Principal};
use crate::models::Post;
use crate::services::AuthorizationGuard;
use crate::services::post_service::{PostError, PostService};

pub struct SeaOrmPostService {
    store: Store,
    guard: AuthorizationGuard,
}

impl SeaOrmPostService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self {
            store,
            guard: AuthorizationGuard,
        }
    }
}

fn require_content(content: &str) -> Result<(), PostError> {
    if content.is_empty() {
        return Err(PostError::InvalidInput("content is required.".to_string()));
    }
    Ok(())
}

#[async_trait]
impl PostService for SeaOrmPostService {
    async fn create_post(&self, author: &Principal, content: &str) -> Result<Post, PostError> {
        require_content(content)?;

        let post = self.store.insert_post(author.user_id, content).await?;
        info!(post_id = %post.id, author_id = %author.user_id, "Post created");
        Ok(post)
    }

    async fn update_post(
        &self,
        author: &Principal,
        post_id: PostId,
        content: &str,
    ) -> Result<Post, PostError> {
        require_content(content)?;

        let existing = self.store.find_post_by_id(post_id).await?;
        let post = self.guard.owned(author, existing)?;

        let saved = self
            .store
            .save_post(&post.revised(content, Utc::now()))
            .await?;

        info!(post_id = %saved.id, author_id = %author.user_id, "Post updated");
        Ok(saved)
    }

    async fn get_post(&self, post_id: PostId) -> Result<Option<Post>, PostError> {
        Ok(self.store.find_post_by_id(post_id).await?)
    }
}
