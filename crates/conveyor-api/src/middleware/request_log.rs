use axum::http::HeaderValue;
use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use uuid::Uuid;

/// Request ID extension type
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Request logging middleware
///
/// Assigns each request a UUID request id (reusing an inbound `X-Request-ID`
/// for tracing across services), logs entry (method, path) and exit (status
/// code, elapsed milliseconds), and echoes the id in the response headers.
pub async fn request_log_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get("X-Request-ID")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let method = request.method().clone();
    let path = request.uri().path().to_string();

    // Insert request ID into request extensions for use in handlers/logging
    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Request started"
    );

    let start = Instant::now();
    let mut response = next.run(request).await;

    tracing::info!(
        request_id = %request_id,
        status_code = response.status().as_u16(),
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Request completed"
    );

    // Add request ID to response headers
    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert("X-Request-ID", header_value);
    }

    response
}

/// Extract request ID from request extensions
pub fn get_request_id(request: &Request) -> Option<String> {
    request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
}
