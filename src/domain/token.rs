//! Opaque bearer tokens handed out at login.
//!
//! The wire shape is `mern-<user_id>-<email>-<nonce>`: exactly four fields
//! joined by `-`, the first one being the literal prefix. Emails containing the
//! delimiter are refused at registration so a token never has to disambiguate
//! them.
//!
//! # Security
//!
//! The fields are not cryptographically bound to each other. The nonce makes
//! tokens unpredictable but is never checked again, so anyone who knows a
//! user's id and email can produce a token that passes validation. Callers get
//! the store cross-check performed by
//! [`TokenValidator`](crate::services::TokenValidator) and nothing more.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use thiserror::Error;

use super::UserId;
use crate::constants::token::{DELIMITER, NONCE_BYTES, PREFIX};

/// Structural failures while parsing a token string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("expected 4 token fields, found {0}")]
    FieldCount(usize),

    #[error("unrecognized token prefix")]
    Prefix,

    #[error("token user id is not a valid identifier")]
    UserId,

    #[error("token {0} field is empty")]
    EmptyField(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    user_id: UserId,
    email: String,
    nonce: String,
}

impl Token {
    /// Builds a token from its parts. The email must not contain the delimiter.
    #[must_use]
    pub fn new(user_id: UserId, email: impl Into<String>, nonce: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            nonce: nonce.into(),
        }
    }

    /// Builds a token with a fresh random nonce.
    #[must_use]
    pub fn generate(user_id: UserId, email: impl Into<String>) -> Self {
        Self::new(user_id, email, generate_nonce())
    }

    /// Strictly parses a token string, validating every field before any of
    /// them is handed out.
    pub fn parse(raw: &str) -> Result<Self, TokenError> {
        let fields: Vec<&str> = raw.split(DELIMITER).collect();

        let &[prefix, user_id, email, nonce] = fields.as_slice() else {
            return Err(TokenError::FieldCount(fields.len()));
        };

        if prefix != PREFIX {
            return Err(TokenError::Prefix);
        }

        let user_id = parse_user_id(user_id)?;

        if email.is_empty() {
            return Err(TokenError::EmptyField("email"));
        }
        if nonce.is_empty() {
            return Err(TokenError::EmptyField("nonce"));
        }

        Ok(Self::new(user_id, email, nonce))
    }

    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn nonce(&self) -> &str {
        &self.nonce
    }
}

fn parse_user_id(field: &str) -> Result<UserId, TokenError> {
    // canonical decimal only: no sign, no leading zeros
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TokenError::UserId);
    }
    if field.len() > 1 && field.starts_with('0') {
        return Err(TokenError::UserId);
    }

    field
        .parse::<i32>()
        .map(UserId::new)
        .map_err(|_| TokenError::UserId)
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{PREFIX}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}",
            self.user_id, self.email, self.nonce
        )
    }
}

impl FromStr for Token {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Returns true if `email` can be embedded in a token without breaking parsing.
#[must_use]
pub fn is_embeddable(email: &str) -> bool {
    !email.contains(DELIMITER)
}

/// Generate a random nonce (16 character hex string)
#[must_use]
pub fn generate_nonce() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; NONCE_BYTES] = rng.random();

    bytes
        .iter()
        .fold(String::with_capacity(NONCE_BYTES * 2), |mut acc, b| {
            use std::fmt::Write;
            let _ = write!(acc, "{b:02x}");
            acc
        })
}
