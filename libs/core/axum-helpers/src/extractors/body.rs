//! Request body extractor accepting either JSON or url-encoded forms.

use crate::errors::AppError;
use axum::{
    body::Bytes,
    extract::{Form, FromRequest, Json, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;

/// Deserializes the body as `application/x-www-form-urlencoded` when the
/// request says so, and as JSON otherwise.
///
/// An empty body, or one sent without a JSON or form content type, reads as
/// `{}` so that missing fields are reported by validation rather than by the
/// extractor. Other rejections become [`AppError`], so a malformed body always
/// yields a `400 { "message": ... }` response.
///
/// # Example
/// ```ignore
/// async fn create(JsonOrForm(input): JsonOrForm<CreateEvent>) -> impl IntoResponse { ... }
/// ```
#[derive(Debug)]
pub struct JsonOrForm<T>(pub T);

const EMPTY_OBJECT: &[u8] = b"{}";

#[derive(Debug, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

fn body_kind(req: &Request) -> BodyKind {
    let Some(content_type) = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return BodyKind::Other;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if essence == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else if essence == "application/json" || essence.ends_with("+json") {
        BodyKind::Json
    } else {
        BodyKind::Other
    }
}

impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_kind(&req) {
            BodyKind::Form => {
                let Form(data) = Form::<T>::from_request(req, state).await?;
                Ok(JsonOrForm(data))
            }
            BodyKind::Json => {
                let bytes = Bytes::from_request(req, state).await?;
                let body = if bytes.is_empty() { EMPTY_OBJECT } else { &bytes[..] };
                let Json(data) = Json::<T>::from_bytes(body)?;
                Ok(JsonOrForm(data))
            }
            BodyKind::Other => {
                let Json(data) = Json::<T>::from_bytes(EMPTY_OBJECT)?;
                Ok(JsonOrForm(data))
            }
        }
    }
}
