use super::{
    SharedStore, token_response,
    types::{Credentials, TokenResponse, decode_credentials},
};
use crate::store::StoreError;
use axum::{
    body::Bytes,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, error, instrument};

#[utoipa::path(
    post,
    path= "/signup",
    request_body = Credentials,
    responses (
        (status = 200, description = "User created", body = TokenResponse, content_type = "application/json"),
        (status = 400, description = "Malformed request body", body = String, content_type = "text/plain"),
        (status = 500, description = "User could not be created, including a taken login", body = String, content_type = "text/plain"),
    ),
    tag= "signup"
)]
// axum handler for signup
#[instrument(skip_all)]
pub async fn signup(store: Extension<SharedStore>, body: Bytes) -> Response {
    let credentials = match decode_credentials(&body) {
        Ok(credentials) => credentials,
        Err(message) => {
            debug!("Malformed signup request: {}", message);

            return (StatusCode::BAD_REQUEST, message).into_response();
        }
    };

    debug!("signup: {}", credentials.login);

    match store
        .create_user(&credentials.login, &credentials.password)
        .await
    {
        Ok(user) => token_response(&user),

        Err(err) => {
            if matches!(err, StoreError::DuplicateLogin) {
                debug!("Login already exists");
            } else {
                error!("Error creating user: {:?}", err);
            }

            // every store failure, including a taken login, is reported as 500
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}
