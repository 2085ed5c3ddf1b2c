//! Per-request access log.

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;

/// Route template when one matched (`/bo/:user_id`), raw path otherwise.
fn route_label(request: &Request) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}

/// Middleware that writes one access line per request.
///
/// Server errors are logged at WARN so store outages stand out from normal
/// traffic; everything else at INFO.
pub async fn request_logger(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let route = route_label(&request);
    let user_id = request
        .uri()
        .path()
        .strip_prefix("/bo/")
        .map(str::to_string);

    let response = next.run(request).await;
    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if response.status().is_server_error() {
        tracing::warn!(%method, %route, ?user_id, status, elapsed_ms, "request failed");
    } else {
        tracing::info!(%method, %route, ?user_id, status, elapsed_ms, "request served");
    }

    response
}
