//! Credential storage.
//!
//! Handlers only see the [`CredentialStore`] trait. [`PgCredentialStore`] backs
//! it with the `users` table, [`InMemoryCredentialStore`] with a map.

pub mod memory;
pub mod password;
pub mod postgres;

pub use self::memory::InMemoryCredentialStore;
pub use self::postgres::{PgCredentialStore, PoolConfig};

use async_trait::async_trait;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Store handle shared by all request handlers.
pub type SharedStore = Arc<dyn CredentialStore>;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Identity record. Never carries a password, hashed or not.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub login: String,
}

impl User {
    #[must_use]
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            id: None,
            login: login.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("login already exists")]
    DuplicateLogin,
    #[error("user not found")]
    UserNotFound,
    #[error("wrong password")]
    WrongPassword,
    #[error("{context}")]
    System {
        context: &'static str,
        #[source]
        source: BoxError,
    },
}

impl StoreError {
    pub fn system(context: &'static str, source: impl Into<BoxError>) -> Self {
        Self::System {
            context,
            source: source.into(),
        }
    }

    /// True when the caller supplied bad credentials, as opposed to the store
    /// failing.
    #[must_use]
    pub const fn is_credential_failure(&self) -> bool {
        matches!(self, Self::UserNotFound | Self::WrongPassword)
    }
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Hash `password` and persist a new user under `login`.
    ///
    /// # Errors
    /// [`StoreError::DuplicateLogin`] if the login is taken, [`StoreError::System`]
    /// if hashing or the insert fails.
    async fn create_user(&self, login: &str, password: &SecretString)
        -> Result<User, StoreError>;

    /// Check `password` against the hash stored for `login`.
    ///
    /// The returned user only has `login` set.
    ///
    /// # Errors
    /// [`StoreError::UserNotFound`], [`StoreError::WrongPassword`], or
    /// [`StoreError::System`] when the lookup fails or the stored hash is unusable.
    async fn authenticate(&self, login: &str, password: &SecretString)
        -> Result<User, StoreError>;

    /// Readiness probe for the health endpoint.
    ///
    /// # Errors
    /// [`StoreError::System`] if the backing storage is unreachable.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_failures_are_classified() {
        assert!(StoreError::UserNotFound.is_credential_failure());
        assert!(StoreError::WrongPassword.is_credential_failure());
        assert!(!StoreError::DuplicateLogin.is_credential_failure());
        assert!(!StoreError::system("create user", "boom").is_credential_failure());
    }

    #[test]
    fn system_error_displays_context_only() {
        let err = StoreError::system("user auth", "connection refused");
        assert_eq!(err.to_string(), "user auth");
        assert_eq!(
            std::error::Error::source(&err).map(ToString::to_string),
            Some("connection refused".to_string())
        );
    }

    #[test]
    fn user_serializes_without_missing_id() -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(User::new("alice"))?;
        assert_eq!(value, serde_json::json!({ "login": "alice" }));
        Ok(())
    }
}
