use super::{
    SharedStore, render_error, token_response,
    types::{Credentials, ErrorBody, TokenResponse, decode_credentials},
};
use axum::{
    body::Bytes,
    extract::Extension,
    http::StatusCode,
    response::Response,
};
use tracing::{debug, error, instrument};

/// Body message for every failed authentication, whatever the cause.
pub const UNAUTHORIZED_MESSAGE: &str = "wrong password";

#[utoipa::path(
    post,
    path= "/auth",
    request_body = Credentials,
    responses (
        (status = 200, description = "Login successful", body = TokenResponse, content_type = "application/json"),
        (status = 400, description = "Malformed request body", body = ErrorBody, content_type = "application/json"),
        (status = 401, description = "Unauthorized", body = ErrorBody, content_type = "application/json"),
    ),
    tag= "auth"
)]
// axum handler for login
#[instrument(skip_all)]
pub async fn auth(store: Extension<SharedStore>, body: Bytes) -> Response {
    let credentials = match decode_credentials(&body) {
        Ok(credentials) => credentials,
        Err(message) => {
            debug!("Malformed auth request: {}", message);

            return render_error(&message, StatusCode::BAD_REQUEST);
        }
    };

    debug!("auth: {}", credentials.login);

    match store
        .authenticate(&credentials.login, &credentials.password)
        .await
    {
        Ok(user) => {
            debug!("Login successful");

            token_response(&user)
        }

        Err(err) => {
            if err.is_credential_failure() {
                debug!("Unauthorized: {}", err);
            } else {
                error!("Error authenticating user: {:?}", err);
            }

            render_error(UNAUTHORIZED_MESSAGE, StatusCode::UNAUTHORIZED)
        }
    }
}
