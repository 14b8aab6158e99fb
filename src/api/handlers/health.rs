use super::SharedStore;
use crate::GIT_COMMIT_HASH;
use axum::{
    body::Body,
    extract::Extension,
    http::{HeaderMap, HeaderValue, Method, StatusCode, header::InvalidHeaderValue},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Health {
    commit: String,
    name: String,
    version: String,
    database: String,
}

#[utoipa::path(
    get,
    path= "/health",
    responses (
        (status = 200, description = "Database is reachable", body = Health),
        (status = 503, description = "Database is unreachable", body = Health)
    ),
    tag= "health"
)]
/// Report build info and whether the credential store answers.
pub async fn health(method: Method, store: Extension<SharedStore>) -> impl IntoResponse {
    let (status, database) = match store.ping().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(err) => {
            error!("Database health check failed: {:?}", err);
            (StatusCode::SERVICE_UNAVAILABLE, "error")
        }
    };

    let health = Health {
        commit: GIT_COMMIT_HASH.to_string(),
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    };

    let mut headers = HeaderMap::new();
    match x_app_header(&health) {
        Ok(value) => {
            headers.insert("X-App", value);
        }
        Err(err) => error!("Failed to build X-App header: {}", err),
    }

    let body = if method == Method::GET {
        Json(&health).into_response()
    } else {
        Body::empty().into_response()
    };

    (status, headers, body)
}

// name:version:short_commit, the commit part empty when unknown
fn x_app_header(health: &Health) -> Result<HeaderValue, InvalidHeaderValue> {
    let short_commit = health.commit.get(..7).filter(|_| health.commit.len() > 7);
    HeaderValue::from_str(&format!(
        "{}:{}:{}",
        health.name,
        health.version,
        short_commit.unwrap_or_default()
    ))
}
