//! Request/response types for the signup and auth endpoints.

use axum::body::Bytes;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(ToSchema, Deserialize, Debug)]
pub struct Credentials {
    pub login: String,
    #[schema(value_type = String, format = Password)]
    pub password: SecretString,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
}

/// Parse a JSON request body, whatever its `Content-Type`, and require both
/// fields to be non-empty.
///
/// The error is the message returned to the client.
pub(super) fn decode_credentials(body: &Bytes) -> Result<Credentials, String> {
    let credentials: Credentials =
        serde_json::from_slice(body).map_err(|err| err.to_string())?;

    if credentials.login.is_empty() {
        return Err("missing login".to_string());
    }

    if credentials.password.expose_secret().is_empty() {
        return Err("missing password".to_string());
    }

    Ok(credentials)
}
