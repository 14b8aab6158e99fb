//! # Credo
//!
//! `credo` is a small authentication service. Users sign up with a login and a
//! password, and log in with the same pair. Both flows answer with a bearer
//! token carrying the authenticated login.
//!
//! ## Credentials
//!
//! Passwords are hashed with Argon2id before they reach the database and are
//! compared, never decrypted, on login. The plaintext only lives in the request
//! payload as a [`secrecy::SecretString`].
//!
//! ## Tokens
//!
//! Tokens are unsigned (`alg: none`) claim sets. They identify a login but do
//! not prove anything on their own; see [`token`].
//!
//! ## Failure responses
//!
//! `/auth` answers every failure with the same `401` body so callers cannot
//! tell an unknown login from a wrong password.

pub mod api;
pub mod cli;
pub mod store;
pub mod token;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
