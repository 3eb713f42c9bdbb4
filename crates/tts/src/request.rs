use axum::{
    body::Body,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde::de::DeserializeOwned;

/// Extractor for JSON request bodies
pub struct ExtractPayload<T>(pub T);

/// Body limit for voice requests (1 MiB)
const BODY_LIMIT_BYTES: usize = 1 << 20;

/// Whether the content type names JSON, ignoring parameters like `charset`
fn is_json(value: &http::HeaderValue) -> bool {
    value
        .to_str()
        .ok()
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

impl<S, T: DeserializeOwned> axum::extract::FromRequest<S> for ExtractPayload<T>
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(request: http::Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();

        if !parts.headers.get(http::header::CONTENT_TYPE).is_some_and(is_json) {
            return Err((
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Unsupported Content-Type, expected: 'Content-Type: application/json'",
            )
                .into_response());
        }

        let bytes = axum::body::to_bytes(body, BODY_LIMIT_BYTES).await.map_err(|err| {
            if std::error::Error::source(&err).is_some_and(|source| source.is::<http_body_util::LengthLimitError>()) {
                (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    format!("Request body is too large, limit is {BODY_LIMIT_BYTES} bytes"),
                )
            } else {
                (StatusCode::BAD_REQUEST, format!("Failed to read request body: {err}"))
            }
            .into_response()
        })?;

        let body = serde_json::from_slice::<T>(&bytes).map_err(|e| {
            (StatusCode::BAD_REQUEST, format!("Failed to parse request body: {e}")).into_response()
        })?;

        Ok(Self(body))
    }
}
