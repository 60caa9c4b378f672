//! Response handling and transformation.
//!
//! # Responsibilities
//! - Relay backend headers to the caller, minus framing headers
//! - Map every gateway failure to a single structured JSON response
//!
//! # Design Decisions
//! - Backend bodies are buffered, so Content-Length, Content-Encoding,
//!   Transfer-Encoding and Connection from the backend no longer describe
//!   what the caller receives and are dropped
//! - The outbound client decodes every content coding it can negotiate
//!   (gzip, br, deflate, zstd), so a dropped Content-Encoding never leaves
//!   an encoded body behind
//! - Duplicate headers (e.g. several Set-Cookie) are preserved
//! - 502 is produced only for outbound transport failures

use axum::{
    http::{header, HeaderMap, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::routing::RouteNotFound;

/// Backend response headers that are never relayed to the caller.
pub static DROPPED_RESPONSE_HEADERS: [HeaderName; 4] = [
    header::CONTENT_ENCODING,
    header::CONTENT_LENGTH,
    header::TRANSFER_ENCODING,
    header::CONNECTION,
];

/// Copy backend headers for the caller, dropping framing headers.
pub fn relay_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(upstream.len());
    for (name, value) in upstream {
        if !DROPPED_RESPONSE_HEADERS.contains(name) {
            headers.append(name.clone(), value.clone());
        }
    }
    headers
}

/// Coarse classification of an outbound transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// Connect or total timeout expired.
    Timeout,
    /// Connection refused/reset, DNS or TLS failure.
    Connect,
    /// Backend response body could not be read.
    Body,
    /// Anything else raised by the outbound call.
    Request,
}

impl FailureKind {
    pub fn classify(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            FailureKind::Timeout
        } else if err.is_connect() {
            FailureKind::Connect
        } else if err.is_body() || err.is_decode() {
            FailureKind::Body
        } else {
            FailureKind::Request
        }
    }
}

/// Every way a proxied request can fail.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error(transparent)]
    RouteNotFound(#[from] RouteNotFound),

    #[error("backend {target} unreachable: {message}")]
    BackendUnreachable {
        target: String,
        kind: FailureKind,
        message: String,
    },

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("failed to read request body: {message}")]
    InvalidRequestBody { message: String },
}

impl GatewayError {
    /// Wrap a transport failure for the backend at `target`.
    pub fn unreachable(target: &str, err: &reqwest::Error) -> Self {
        GatewayError::BackendUnreachable {
            target: target.to_string(),
            kind: FailureKind::classify(err),
            message: error_chain(err),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::BackendUnreachable { .. } => StatusCode::BAD_GATEWAY,
            GatewayError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::InvalidRequestBody { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            GatewayError::RouteNotFound(RouteNotFound { path }) => json!({
                "error": "No route found",
                "path": path,
            }),
            GatewayError::BackendUnreachable {
                target,
                kind,
                message,
            } => json!({
                "error": "Bad Gateway",
                "message": message,
                "target": target,
                "kind": kind,
            }),
            GatewayError::PayloadTooLarge { limit } => json!({
                "error": "Payload Too Large",
                "limit": limit,
            }),
            GatewayError::InvalidRequestBody { message } => json!({
                "error": "Bad Request",
                "message": message,
            }),
        };
        (status, Json(body)).into_response()
    }
}

/// Render an error and its sources as one line.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn relay_drops_framing_headers_only() {
        let mut upstream = HeaderMap::new();
        for (name, value) in [
            ("Content-Encoding", "gzip"),
            ("content-length", "42"),
            ("Transfer-Encoding", "chunked"),
            ("CONNECTION", "keep-alive"),
        ] {
            upstream.insert(
                HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_static(value),
            );
        }
        upstream.insert("content-type", HeaderValue::from_static("text/html"));
        upstream.insert("location", HeaderValue::from_static("/login"));
        upstream.append("set-cookie", HeaderValue::from_static("a=1"));
        upstream.append("set-cookie", HeaderValue::from_static("b=2"));

        let relayed = relay_headers(&upstream);

        for dropped in DROPPED_RESPONSE_HEADERS.iter() {
            assert!(!relayed.contains_key(dropped), "{} relayed", dropped);
        }
        assert_eq!(relayed["content-type"], "text/html");
        assert_eq!(relayed["location"], "/login");
        let cookies: Vec<_> = relayed.get_all("set-cookie").iter().collect();
        assert_eq!(cookies, vec!["a=1", "b=2"]);
    }

    #[tokio::test]
    async fn not_found_body() {
        let err = GatewayError::from(RouteNotFound {
            path: "/unknown".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(response).await,
            json!({"error": "No route found", "path": "/unknown"})
        );
    }

    #[tokio::test]
    async fn bad_gateway_body() {
        let err = GatewayError::BackendUnreachable {
            target: "http://backend:9000".to_string(),
            kind: FailureKind::Connect,
            message: "connection refused".to_string(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Bad Gateway");
        assert_eq!(body["message"], "connection refused");
        assert_eq!(body["target"], "http://backend:9000");
        assert_eq!(body["kind"], "connect");
    }

    #[test]
    fn only_transport_failures_are_bad_gateway() {
        let others = [
            GatewayError::from(RouteNotFound {
                path: "/".to_string(),
            }),
            GatewayError::PayloadTooLarge { limit: 1 },
            GatewayError::InvalidRequestBody {
                message: "reset".to_string(),
            },
        ];
        for err in others {
            assert_ne!(err.status(), StatusCode::BAD_GATEWAY);
        }
    }
}
