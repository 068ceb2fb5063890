//! Ownership checks for post mutations.
//!
//! A missing post and a post owned by someone else produce the same
//! [`PostError::NotFoundOrUnauthorized`], so callers cannot probe for the
//! existence of other users' posts.

use crate::domain::Principal;
use crate::models::Post;
use crate::services::PostError;

#[derive(Debug, Default, Clone, Copy)]
pub struct AuthorizationGuard;

impl AuthorizationGuard {
    pub fn require_ownership(&self, principal: &Principal, post: &Post) -> Result<(), PostError> {
        if post.author_id == principal.user_id {
            Ok(())
        } else {
            Err(PostError::NotFoundOrUnauthorized)
        }
    }

    /// Applies [`require_ownership`](Self::require_ownership) to a lookup result.
    pub fn owned(&self, principal: &Principal, post: Option<Post>) -> Result<Post, PostError> {
        let post = post.ok_or(PostError::NotFoundOrUnauthorized)?;
        self.require_ownership(principal, &post)?;
        Ok(post)
    }
}
