//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::domain::{Principal, UserId};
use crate::services::auth_service::{AuthError, AuthService, LoginResult};
use crate::services::{CredentialStore, TokenIssuer, TokenValidator};

pub struct SeaOrmAuthService {
    credentials: CredentialStore,
    issuer: TokenIssuer,
    validator: TokenValidator,
}

impl SeaOrmAuthService {
    #[must_use]
    pub fn new(store: Store, security: SecurityConfig) -> Self {
        Self {
            credentials: CredentialStore::new(store.clone(), security),
            issuer: TokenIssuer,
            validator: TokenValidator::new(store),
        }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(
        &self,
        user_name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserId, AuthError> {
        self.credentials.register(user_name, email, password).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError> {
        let user = self.credentials.verify(email, password).await?;
        let token = self.issuer.issue(&user);

        info!(user_id = %user.id, "User logged in");

        Ok(LoginResult {
            user_id: user.id,
            api_key: token.to_string(),
        })
    }

    async fn authenticate(&self, token: &str) -> Result<Principal, AuthError> {
        self.validator.authenticate(token).await
    }
}
