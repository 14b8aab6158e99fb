use super::types::ErrorBody;
use axum::{
    http::{HeaderValue, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// Render `{"message": ...}` with `status`.
pub fn render_error(message: &str, status: StatusCode) -> Response {
    render_json(
        &ErrorBody {
            message: message.to_string(),
        },
        status,
    )
}

// A body that fails to serialize becomes an empty 500; the failure is only logged.
fn render_json<T: Serialize>(body: &T, status: StatusCode) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => (
            status,
            [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            bytes,
        )
            .into_response(),
        Err(err) => {
            error!("Failed to serialize error body: {}", err);

            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use axum::body::to_bytes;

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("refusing to serialize"))
        }
    }

    #[tokio::test]
    async fn renders_message_with_status() -> Result<()> {
        let response = render_error("wrong password", StatusCode::UNAUTHORIZED);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(CONTENT_TYPE),
            Some(&HeaderValue::from_static("application/json"))
        );

        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let payload: ErrorBody = serde_json::from_slice(&body)?;
        assert_eq!(payload.message, "wrong password");
        Ok(())
    }

    #[tokio::test]
    async fn serialization_failure_falls_back_to_empty_500() -> Result<()> {
        let response = render_json(&Unserializable, StatusCode::UNAUTHORIZED);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await?;
        assert!(body.is_empty());
        Ok(())
    }
}
