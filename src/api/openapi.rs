#![allow(clippy::needless_for_each)]

use super::handlers::{auth, health, signup, types};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(signup::signup, auth::auth, health::health),
    components(schemas(
        types::Credentials,
        types::TokenResponse,
        types::ErrorBody,
        health::Health
    )),
    tags(
        (name = "credo", description = "Signup and login API")
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
