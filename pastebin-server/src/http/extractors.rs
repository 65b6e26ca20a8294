//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{header, HeaderMap};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;

/// JSON body that falls back to `T::default()` instead of rejecting.
///
/// - content type other than `application/json`, or an empty body → default
/// - a JSON array → default (no named fields to read)
/// - syntactically invalid JSON or a bare scalar → 400
pub struct LenientJson<T>(pub T);

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = is_json(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest {
                message: e.body_text(),
            })?;

        if !json || bytes.is_empty() {
            return Ok(Self(T::default()));
        }

        let value: Value = serde_json::from_slice(&bytes).map_err(|e| ApiError::BadRequest {
            message: format!("invalid JSON body: {}", e),
        })?;

        match value {
            Value::Object(_) => serde_json::from_value(value)
                .map(Self)
                .map_err(|e| ApiError::BadRequest {
                    message: format!("invalid JSON body: {}", e),
                }),
            Value::Array(_) => Ok(Self(T::default())),
            _ => Err(ApiError::BadRequest {
                message: "JSON body must be an object or array".into(),
            }),
        }
    }
}
