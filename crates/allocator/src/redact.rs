//! Request logging with PII redaction.
//!
//! Request bodies are logged with sensitive JSON string fields replaced by
//! `[REDACTED]` and truncated to 1000 characters.

use std::sync::LazyLock;
use std::time::Instant;

use axum::body::{to_bytes, Body};
use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use regex::Regex;
use tracing::info;

const MAX_LOGGED_BODY: usize = 1000;

static SENSITIVE_FIELDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)"(password|email|phone|token|api_key|secret|authorization)"\s*:\s*"[^"]*""#,
    )
    .expect("sensitive-field pattern is valid")
});

/// Redact sensitive JSON fields and truncate for logging.
pub fn strip_pii(body: &str) -> String {
    let mut result = SENSITIVE_FIELDS
        .replace_all(body, r#""$1":"[REDACTED]""#)
        .into_owned();

    if result.len() > MAX_LOGGED_BODY {
        let mut cut = MAX_LOGGED_BODY;
        while !result.is_char_boundary(cut) {
            cut -= 1;
        }
        result.truncate(cut);
        result.push_str("...[TRUNCATED]");
    }

    result
}

/// Middleware that logs each request with its redacted body.
pub async fn log_requests(request: Request, next: Next) -> Result<Response, StatusCode> {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?;

    let logged_body = if bytes.is_empty() {
        None
    } else {
        Some(strip_pii(&String::from_utf8_lossy(&bytes)))
    };

    let request = Request::from_parts(parts, Body::from(bytes));
    let response = next.run(request).await;

    match logged_body {
        Some(body) => info!(
            method = %method,
            path = %path,
            status = response.status().as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_body = %body,
            "http request"
        ),
        None => info!(
            method = %method,
            path = %path,
            status = response.status().as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "http request"
        ),
    }

    Ok(response)
}
