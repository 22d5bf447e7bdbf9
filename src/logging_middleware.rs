//! Middleware for request logging, with API bodies logged in debug mode

use axum::body::{to_bytes, HttpBody};
use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::common::ApiError;

/// Bodies larger than this are never buffered for logging.
const MAX_LOGGED_BODY: usize = 16 * 1024;

/// Logs every request's outcome; buffers small API bodies for debug output.
pub async fn log_request_response(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let request = if tracing::enabled!(tracing::Level::DEBUG) && path.starts_with("/api/") {
        match log_request_body(request).await {
            Ok(request) => request,
            Err(e) => return e.into_response(),
        }
    } else {
        request
    };

    let response = next.run(request).await;

    info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Handled request"
    );

    if tracing::enabled!(tracing::Level::DEBUG) && is_json(response.headers()) {
        return log_response_body(response).await;
    }
    response
}

fn declared_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.contains("json"))
        .unwrap_or(false)
}

async fn log_request_body(request: Request) -> Result<Request, ApiError> {
    // Only buffer when the size is declared and small; the handler enforces the real cap.
    match declared_length(request.headers()) {
        Some(len) if len > 0 && len <= MAX_LOGGED_BODY => {}
        _ => return Ok(request),
    }

    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, MAX_LOGGED_BODY)
        .await
        .map_err(|e| ApiError::BodyRead(e.to_string()))?;

    debug!(
        method = %parts.method,
        uri = %parts.uri,
        request_body = %String::from_utf8_lossy(&bytes),
        "📥 Request"
    );

    Ok(Request::from_parts(parts, Body::from(bytes)))
}

/// Buffers only responses whose size is known to fit; anything else passes
/// through untouched so logging never alters what the client receives.
async fn log_response_body(response: Response) -> Response {
    let bounded = declared_length(response.headers())
        .or_else(|| {
            HttpBody::size_hint(response.body())
                .upper()
                .and_then(|n| usize::try_from(n).ok())
        })
        .is_some_and(|len| len <= MAX_LOGGED_BODY);
    if !bounded {
        return response;
    }

    let (parts, body) = response.into_parts();
    match to_bytes(body, MAX_LOGGED_BODY).await {
        Ok(bytes) => {
            debug!(
                status = %parts.status,
                response_body = %String::from_utf8_lossy(&bytes),
                "📤 Response"
            );
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            // The body stream itself failed; the client would not have received it either.
            warn!(error = %e, status = %parts.status, "Response body failed while logging");
            Response::from_parts(parts, Body::empty())
        }
    }
}
