pub mod auth;
pub use self::auth::auth;

pub mod error;
pub use self::error::render_error;

pub mod health;
pub use self::health::health;

pub mod signup;
pub use self::signup::signup;

pub mod types;

// common functions for the handlers
use crate::{store::User, token};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

pub use crate::store::SharedStore;

pub async fn root() -> &'static str {
    "🔑"
}

/// Issue a token for `user` and wrap it in a `200` JSON body.
pub(crate) fn token_response(user: &User) -> Response {
    match token::issue(user) {
        Ok(token) => (StatusCode::OK, Json(types::TokenResponse { token })).into_response(),
        Err(err) => {
            error!("Error issuing token: {:?}", err);

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("gen token: {err}"),
            )
                .into_response()
        }
    }
}
