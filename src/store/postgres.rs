//! PostgreSQL-backed credential store.

use super::{CredentialStore, StoreError, User, password};
use anyhow::{Context, Result};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use sqlx::{Connection, PgPool, Row, postgres::PgPoolOptions};
use std::time::Duration;
use tracing::{Instrument, debug, info_span, instrument};
use uuid::Uuid;

const SELECT_PASSWORD: &str = "SELECT password FROM users WHERE login = $1";
const INSERT_USER: &str = "INSERT INTO users (login, password) VALUES ($1, $2) RETURNING id";

/// Connection pool limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    max_connections: u32,
    min_connections: u32,
    acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 5,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

impl PoolConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Connections the pool keeps open while idle.
    #[must_use]
    pub const fn with_min_connections(mut self, min_connections: u32) -> Self {
        self.min_connections = min_connections;
        self
    }

    #[must_use]
    pub const fn with_acquire_timeout(mut self, acquire_timeout: Duration) -> Self {
        self.acquire_timeout = acquire_timeout;
        self
    }

    #[must_use]
    pub const fn max_connections(&self) -> u32 {
        self.max_connections
    }

    #[must_use]
    pub const fn min_connections(&self) -> u32 {
        self.min_connections
    }

    #[must_use]
    pub const fn acquire_timeout(&self) -> Duration {
        self.acquire_timeout
    }

    /// Open the pool described by this config.
    ///
    /// # Errors
    /// Returns an error if the initial connections can't be established.
    pub async fn connect(&self, dsn: &str) -> Result<PgPool> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.acquire_timeout)
            .max_lifetime(Duration::from_secs(60 * 2))
            .test_before_acquire(true)
            .connect(dsn)
            .await
            .context("Failed to connect to database")
    }
}

#[derive(Debug, Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn lookup_password(&self, login: &str) -> Result<Option<String>, sqlx::Error> {
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = SELECT_PASSWORD
        );
        let row = sqlx::query(SELECT_PASSWORD)
            .bind(login)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await?;

        row.map(|row| row.try_get("password")).transpose()
    }

    async fn insert_user(&self, login: &str, hash: &str) -> Result<Uuid, sqlx::Error> {
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = INSERT_USER
        );
        let row = sqlx::query(INSERT_USER)
            .bind(login)
            .bind(hash)
            .fetch_one(&self.pool)
            .instrument(span)
            .await?;

        row.try_get("id")
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code == "23505"),
        _ => false,
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    #[instrument(skip(self, password))]
    async fn create_user(
        &self,
        login: &str,
        password: &SecretString,
    ) -> Result<User, StoreError> {
        let hash = password::hash(password.expose_secret())?;

        match self.insert_user(login, &hash).await {
            Ok(id) => {
                debug!("user created");

                Ok(User {
                    id: Some(id),
                    login: login.to_string(),
                })
            }
            Err(err) if is_unique_violation(&err) => Err(StoreError::DuplicateLogin),
            Err(err) => Err(StoreError::system("create user", err)),
        }
    }

    #[instrument(skip(self, password))]
    async fn authenticate(
        &self,
        login: &str,
        password: &SecretString,
    ) -> Result<User, StoreError> {
        let stored = self
            .lookup_password(login)
            .await
            .map_err(|e| StoreError::system("user auth", e))?;

        let Some(stored) = stored else {
            password::verify_dummy(password.expose_secret());
            return Err(StoreError::UserNotFound);
        };

        password::verify(password.expose_secret(), &stored)?;

        Ok(User::new(login))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let acquire_span = info_span!(
            "db.acquire",
            db.system = "postgresql",
            db.operation = "ACQUIRE"
        );
        let mut conn = self
            .pool
            .acquire()
            .instrument(acquire_span)
            .await
            .map_err(|e| StoreError::system("acquire connection", e))?;

        let ping_span = info_span!("db.ping", db.system = "postgresql", db.operation = "PING");
        conn.ping()
            .instrument(ping_span)
            .await
            .map_err(|e| StoreError::system("ping database", e))
    }
}
