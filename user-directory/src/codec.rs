//! Response encoding.
//!
//! Success payloads are written as plain JSON; failures are written as an
//! [`ErrorEnvelope`]. Both carry `Access-Control-Allow-Origin: *` since the
//! API is consumed by browser clients on other origins.

use axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use user_directory_common::ErrorEnvelope;

use crate::error::Error;

fn any_origin() -> HeaderValue {
    HeaderValue::from_static("*")
}

/// A 200 response whose body is the JSON encoding of the payload.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<T: Serialize> IntoResponse for ApiJson<T> {
    fn into_response(self) -> Response {
        encode_success(&self.0)
    }
}

/// Encode a successful query result.
pub fn encode_success<T: Serialize>(payload: &T) -> Response {
    (
        StatusCode::OK,
        [(ACCESS_CONTROL_ALLOW_ORIGIN, any_origin())],
        Json(payload),
    )
        .into_response()
}

/// Status code reported for each failure kind.
pub fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        Error::Decode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        Error::NotFound(_) => StatusCode::NOT_FOUND,
    }
}

/// Encode a failure as an error envelope.
pub fn encode_error(err: Error) -> Response {
    let status = status_for(&err);
    if status.is_server_error() {
        tracing::error!(status = status.as_u16(), "Request failed: {}", err);
    } else {
        tracing::debug!(status = status.as_u16(), "Request failed: {}", err);
    }

    let body = ErrorEnvelope::new(status.as_u16(), err.to_string());
    (status, [(ACCESS_CONTROL_ALLOW_ORIGIN, any_origin())], Json(body)).into_response()
}
