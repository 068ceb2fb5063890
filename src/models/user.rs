use chrono::{DateTime, Utc};

use crate::domain::UserId;

/// A registered user. The password hash never leaves the repository layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub user_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
