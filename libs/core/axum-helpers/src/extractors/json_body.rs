//! JSON body extractor with a uniform rejection.

use crate::errors::{AppError, messages};
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;

/// Drop-in replacement for [`axum::Json`] as an extractor.
///
/// Every [`JsonRejection`](axum::extract::rejection::JsonRejection) (missing
/// content type, syntax error, type mismatch) becomes
/// `400 {"error": "invalid request format"}`.
///
/// # Example
/// ```ignore
/// use axum_helpers::JsonBody;
///
/// async fn update(JsonBody(payload): JsonBody<UpdateItem>) { /* ... */ }
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(%rejection, "Rejected request body");
            AppError::BadRequest(messages::INVALID_REQUEST_FORMAT.to_string())
        })?;

        Ok(JsonBody(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::post,
    };
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Payload {
        value: i64,
    }

    async fn echo(JsonBody(payload): JsonBody<Payload>) -> String {
        payload.value.to_string()
    }

    fn app() -> Router {
        Router::new().route("/", post(echo))
    }

    async fn send(body: &str, content_type: Option<&str>) -> (StatusCode, String) {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        let response = app()
            .oneshot(builder.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_accepts_valid_json() {
        let (status, body) = send(r#"{"value": 7}"#, Some("application/json")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "7");
    }

    #[tokio::test]
    async fn test_rejects_syntax_error() {
        let (status, body) = send("{not json", Some("application/json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"invalid request format"}"#);
    }

    #[tokio::test]
    async fn test_rejects_type_mismatch() {
        let (status, body) = send(r#"{"value": "seven"}"#, Some("application/json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"invalid request format"}"#);
    }

    #[tokio::test]
    async fn test_rejects_missing_content_type() {
        let (status, _) = send(r#"{"value": 7}"#, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
