//! Registration and password verification against the store.

use anyhow::Context;
use tokio::task;
use tracing::{debug, info};

use crate::config::SecurityConfig;
use crate::db::{self, Store};
use crate::domain::{UserId, token};
use crate::models::User;
use crate::services::AuthError;

pub struct CredentialStore {
    store: Store,
    security: SecurityConfig,
}

impl CredentialStore {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    pub async fn register(
        &self,
        user_name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserId, AuthError> {
        if user_name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::invalid_input("All fields are required."));
        }

        if !token::is_embeddable(email) {
            return Err(AuthError::invalid_input("Email cannot contain '-'."));
        }

        // Advisory only; the unique index decides races.
        if self.store.find_user_by_email(email).await?.is_some() {
            return Err(AuthError::DuplicateEmail);
        }

        let password = password.to_string();
        let security = self.security.clone();
        let password_hash = task::spawn_blocking(move || db::hash_password(&password, &security))
            .await
            .context("Password hashing task panicked")??;

        let user = self
            .store
            .insert_user(user_name, email, password_hash)
            .await?
            .ok_or(AuthError::DuplicateEmail)?;

        info!(user_id = %user.id, "Registered user");
        Ok(user.id)
    }

    /// Unknown email and wrong password both yield `InvalidCredentials`.
    pub async fn verify(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let Some((user, password_hash)) = self.store.find_user_credentials(email).await? else {
            debug!("Login attempt for unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        let password = password.to_string();
        let is_valid = task::spawn_blocking(move || db::verify_password(&password, &password_hash))
            .await
            .context("Password verification task panicked")??;

        if is_valid {
            Ok(user)
        } else {
            debug!(user_id = %user.id, "Login attempt with wrong password");
            Err(AuthError::InvalidCredentials)
        }
    }
}
