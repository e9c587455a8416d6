//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// The number of bytes of a request or response body that are logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// The largest request body that is read, matching axum's default body limit.
const REQUEST_BODY_SIZE_LIMIT: usize = 2 * 1024 * 1024;

/// The largest response body that is read, large enough for a CSV export.
const RESPONSE_BODY_SIZE_LIMIT: usize = 16 * 1024 * 1024;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
///
/// Requests with a body larger than 2 MiB are
/// refused with `413 Payload Too Large`.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match axum::body::to_bytes(body, REQUEST_BODY_SIZE_LIMIT).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read request body: {error}");
            return (
                StatusCode::PAYLOAD_TOO_LARGE,
                "Could not read request body, it may be too large",
            )
                .into_response();
        }
    };
    log_body(&format!("Received request: {parts:#?}"), &body_bytes);

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match axum::body::to_bytes(body, RESPONSE_BODY_SIZE_LIMIT).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("Could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    log_body(&format!("Sending response: {parts:#?}"), &body_bytes);

    Response::from_parts(parts, Body::from(body_bytes))
}

fn log_body(message: &str, body: &Bytes) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        // Truncating may split a multi-byte character, the lossy conversion
        // replaces the partial character.
        let truncated = String::from_utf8_lossy(&body[..LOG_BODY_LENGTH_LIMIT]);
        tracing::info!("{message}\nbody: {truncated}...");
        tracing::debug!("Full body: {:?}", String::from_utf8_lossy(body));
    } else {
        tracing::info!("{message}\nbody: {:?}", String::from_utf8_lossy(body));
    }
}
