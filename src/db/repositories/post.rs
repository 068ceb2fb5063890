use anyhow::{Context, Result};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::debug;

use crate::domain::{PostId, UserId};
use crate::entities::{posts, prelude::*};
use crate::models::Post;

impl From<posts::Model> for Post {
    fn from(model: posts::Model) -> Self {
        Self {
            id: PostId::new(model.id),
            author_id: UserId::new(model.author_id),
            content: model.content,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Repository for post records. Has no notion of ownership; that is enforced
/// by [`AuthorizationGuard`](crate::services::AuthorizationGuard).
pub struct PostRepository {
    conn: DatabaseConnection,
}

impl PostRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert a post with `created_at == updated_at == now`.
    pub async fn insert(&self, author_id: UserId, content: &str) -> Result<Post> {
        let now = Utc::now();
        let active = posts::ActiveModel {
            author_id: Set(author_id.value()),
            content: Set(content.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert post")?;

        debug!(post_id = model.id, author_id = %author_id, "Inserted post");
        Ok(Post::from(model))
    }

    pub async fn get(&self, id: PostId) -> Result<Option<Post>> {
        let post = Posts::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query post by ID")?;

        Ok(post.map(Post::from))
    }

    /// Persist the mutable fields of `post`. `author_id` and `created_at` are
    /// never written after insertion.
    pub async fn save(&self, post: &Post) -> Result<Post> {
        let active = posts::ActiveModel {
            id: Set(post.id.value()),
            content: Set(post.content.clone()),
            updated_at: Set(post.updated_at),
            ..Default::default()
        };

        let model = active
            .update(&self.conn)
            .await
            .with_context(|| format!("Failed to save post {}", post.id))?;

        Ok(Post::from(model))
    }
}
