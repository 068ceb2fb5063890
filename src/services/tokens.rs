//! Issuing and validating bearer tokens.

use tracing::debug;

use crate::db::Store;
use crate::domain::{Principal, Token};
use crate::models::User;
use crate::services::AuthError;

#[derive(Debug, Default, Clone, Copy)]
pub struct TokenIssuer;

impl TokenIssuer {
    /// Issue a token with a fresh nonce. No signature or expiry is attached.
    #[must_use]
    pub fn issue(&self, user: &User) -> Token {
        Token::generate(user.id, user.email.clone())
    }
}

/// Parses tokens and cross-checks them against the store. Read-only.
pub struct TokenValidator {
    store: Store,
}

impl TokenValidator {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn authenticate(&self, raw: &str) -> Result<Principal, AuthError> {
        let token = Token::parse(raw)?;

        let Some(user) = self.store.find_user_by_id(token.user_id()).await? else {
            debug!(user_id = %token.user_id(), "Token names unknown user");
            return Err(AuthError::InvalidToken);
        };

        // Exact byte comparison; no case folding.
        if user.email != token.email() {
            debug!(user_id = %user.id, "Token email does not match stored email");
            return Err(AuthError::InvalidToken);
        }

        Ok(Principal {
            user_id: user.id,
            email: user.email,
        })
    }
}
