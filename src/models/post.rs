use chrono::{DateTime, Duration, Utc};

use crate::domain::{PostId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    /// Set once at creation, never reassigned.
    pub author_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Returns a copy carrying `content` and a fresh `updated_at`.
    ///
    /// `updated_at` always moves strictly forward, even when the clock has not
    /// advanced since the previous write.
    #[must_use]
    pub fn revised(&self, content: impl Into<String>, now: DateTime<Utc>) -> Self {
        let floor = self.updated_at + Duration::microseconds(1);

        Self {
            content: content.into(),
            updated_at: now.max(floor),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(at: DateTime<Utc>) -> Post {
        Post {
            id: PostId::new(1),
            author_id: UserId::new(2),
            content: "hello".to_string(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_revised_keeps_identity_fields() {
        let created = Utc::now();
        let post = sample(created);

        let revised = post.revised("hello v2", created + Duration::seconds(5));

        assert_eq!(revised.id, post.id);
        assert_eq!(revised.author_id, post.author_id);
        assert_eq!(revised.created_at, created);
        assert_eq!(revised.content, "hello v2");
        assert_eq!(revised.updated_at, created + Duration::seconds(5));
    }

    #[test]
    fn test_revised_moves_forward_on_stalled_clock() {
        let created = Utc::now();
        let post = sample(created);

        let revised = post.revised("same", created);
        assert!(revised.updated_at > post.updated_at);

        let earlier = post.revised("same", created - Duration::seconds(10));
        assert!(earlier.updated_at > post.updated_at);
    }
}
