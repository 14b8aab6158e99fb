use super::{CredentialStore, StoreError, User, password};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::collections::{HashMap, hash_map::Entry};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug)]
struct StoredUser {
    id: Uuid,
    password: String,
}

/// Map-backed store with the same semantics as the `users` table.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    users: RwLock<HashMap<String, StoredUser>>,
}

impl InMemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `login` with an already computed hash string, replacing any
    /// existing entry.
    pub async fn insert_hash(&self, login: &str, hash: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.users.write().await.insert(
            login.to_string(),
            StoredUser {
                id,
                password: hash.to_string(),
            },
        );
        id
    }

    pub async fn id_of(&self, login: &str) -> Option<Uuid> {
        self.users.read().await.get(login).map(|user| user.id)
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn create_user(
        &self,
        login: &str,
        password: &SecretString,
    ) -> Result<User, StoreError> {
        let hash = password::hash(password.expose_secret())?;

        match self.users.write().await.entry(login.to_string()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateLogin),
            Entry::Vacant(slot) => {
                let id = Uuid::new_v4();
                slot.insert(StoredUser { id, password: hash });

                Ok(User {
                    id: Some(id),
                    login: login.to_string(),
                })
            }
        }
    }

    async fn authenticate(
        &self,
        login: &str,
        password: &SecretString,
    ) -> Result<User, StoreError> {
        let stored = self
            .users
            .read()
            .await
            .get(login)
            .map(|user| user.password.clone());

        let Some(stored) = stored else {
            password::verify_dummy(password.expose_secret());
            return Err(StoreError::UserNotFound);
        };

        password::verify(password.expose_secret(), &stored)?;

        Ok(User::new(login))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    #[tokio::test]
    async fn create_then_authenticate() -> Result<(), StoreError> {
        let store = InMemoryCredentialStore::new();

        let created = store.create_user("alice", &secret("secret123")).await?;
        assert_eq!(created.login, "alice");
        assert_eq!(created.id, store.id_of("alice").await);
        assert!(created.id.is_some());

        let user = store.authenticate("alice", &secret("secret123")).await?;
        assert_eq!(user, User::new("alice"));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_login_is_rejected() -> Result<(), StoreError> {
        let store = InMemoryCredentialStore::new();
        store.create_user("alice", &secret("secret123")).await?;

        let second = store.create_user("alice", &secret("other")).await;
        assert!(matches!(second, Err(StoreError::DuplicateLogin)));
        assert_eq!(store.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_login_and_wrong_password_differ() -> Result<(), StoreError> {
        let store = InMemoryCredentialStore::new();
        store.create_user("alice", &secret("secret123")).await?;

        let wrong = store.authenticate("alice", &secret("wrong")).await;
        assert!(matches!(wrong, Err(StoreError::WrongPassword)));

        let missing = store.authenticate("bob", &secret("secret123")).await;
        assert!(matches!(missing, Err(StoreError::UserNotFound)));
        Ok(())
    }

    #[tokio::test]
    async fn stored_value_is_not_the_password() -> Result<(), StoreError> {
        let store = InMemoryCredentialStore::new();
        store.create_user("alice", &secret("secret123")).await?;

        let users = store.users.read().await;
        let stored = users.get("alice").map(|user| user.password.as_str());
        assert!(stored.is_some_and(|hash| hash.starts_with("$argon2id$")));
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_hash_is_a_system_error() {
        let store = InMemoryCredentialStore::new();
        store.insert_hash("alice", "plaintext-password").await;

        let result = store.authenticate("alice", &secret("secret123")).await;
        assert!(matches!(result, Err(StoreError::System { .. })));
    }
}
