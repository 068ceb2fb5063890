//! Domain service for registration, login and token authentication.

use serde::Serialize;
use thiserror::Error;

use crate::domain::{Principal, TokenError, UserId};

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Email already exists")]
    DuplicateEmail,

    /// Unknown email and wrong password are deliberately the same error.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Malformed token: {0}")]
    MalformedToken(#[from] TokenError),

    /// Structurally valid token that names an unknown user or the wrong email.
    #[error("Invalid token")]
    InvalidToken,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Login result containing the freshly issued bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub user_id: UserId,
    pub api_key: String,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Registers a new user and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidInput`] for empty fields or an email that
    /// cannot be embedded in a token, [`AuthError::DuplicateEmail`] if the
    /// email is taken.
    async fn register(
        &self,
        user_name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserId, AuthError>;

    /// Verifies credentials and issues a new token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError>;

    /// Resolves a bearer token into the calling principal.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedToken`] or [`AuthError::InvalidToken`].
    async fn authenticate(&self, token: &str) -> Result<Principal, AuthError>;
}
